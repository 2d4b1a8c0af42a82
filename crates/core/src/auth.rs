use serde::{Deserialize, Serialize};

/// Caller identity forwarded by the upstream authentication gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    email: Option<String>,
}

impl UserIdentity {
    /// Creates a caller identity from the gateway's subject claim.
    #[must_use]
    pub fn new(subject: impl Into<String>, email: Option<String>) -> Self {
        Self {
            subject: subject.into(),
            email,
        }
    }

    /// Returns the stable subject claim, which is the caller's user id.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the email, if the gateway forwarded one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
