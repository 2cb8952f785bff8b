//! Classification of cloud agent failures.
//!
//! An unreachable agent is an environment problem, not something a caller
//! can retry its way out of. Such failures come back as
//! [`Error::TransportUnavailable`] after being logged with a backtrace;
//! everything else passes through as [`Error::Agent`].

use std::backtrace::Backtrace;

use cloudagent_api::Code;

use crate::Error;

pub fn is_transport_unavailable(err: &cloudagent_api::Error) -> bool {
    err.code() == Code::Unavailable
}

pub fn classify(err: cloudagent_api::Error) -> Error {
    if is_transport_unavailable(&err) {
        let backtrace = Backtrace::force_capture();
        tracing::error!(error = %err.message(), "communication with cloud agent failed");
        tracing::error!(%backtrace, "cloud agent unavailable");
        return Error::TransportUnavailable(err);
    }
    Error::Agent(err)
}
