//! Request credentials

use reqwest::RequestBuilder;

/// Credentials attached to every outbound request
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    /// No authentication, public data only
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The developer token
        token: String,
    },
}

impl Credentials {
    /// Build credentials from a possibly empty token
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            Self::None
        } else {
            Self::Bearer { token }
        }
    }

    /// Check if a token is configured
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Bearer { .. })
    }

    /// Apply credentials to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Self::None => req,
            Self::Bearer { token } => req.bearer_auth(token),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}
