use crate::{Error, Result};

/// Produces the credential attached to every cloud agent call.
///
/// The client treats this as opaque: either a token comes back or channel
/// construction fails.
pub trait Authorizer: Send + Sync {
    fn token(&self) -> Result<String>;
}

/// Authorizer backed by a pre-issued bearer token.
#[derive(Clone)]
pub struct StaticTokenAuthorizer {
    token: String,
}

impl StaticTokenAuthorizer {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Create from env var `MOC_ACCESS_TOKEN` (required).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let token = std::env::var("MOC_ACCESS_TOKEN")
            .map_err(|_| Error::MissingEnv("MOC_ACCESS_TOKEN".into()))?;
        Ok(Self::new(token))
    }
}

impl Authorizer for StaticTokenAuthorizer {
    fn token(&self) -> Result<String> {
        if self.token.is_empty() {
            return Err(Error::Unauthorized("empty access token".into()));
        }
        Ok(self.token.clone())
    }
}
