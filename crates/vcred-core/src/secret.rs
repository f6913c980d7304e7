//! # Credential Wrapper
//!
//! `ApiCredential` carries bearer tokens and API keys injected by the
//! process owner at startup. The value is zeroized on drop and never
//! appears in `Debug` output, so a credential cannot leak through logs
//! or error formatting.
//!
//! Credentials are configuration, not source: nothing in this workspace
//! embeds one.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret credential supplied through configuration.
///
/// Holds bearer tokens for the document collection and the pinning
/// service. The inner string is zeroized when the wrapper is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Wrap a credential supplied by the application root.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Expose the secret for constructing an `Authorization` header.
    ///
    /// Call sites should use the value immediately and not store copies.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the credential is empty (unconfigured).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiCredential(<redacted>)")
    }
}

impl From<String> for ApiCredential {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for ApiCredential {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expose_returns_inner_value() {
        let cred = ApiCredential::new("jwt-token-value");
        assert_eq!(cred.expose(), "jwt-token-value");
        assert!(!cred.is_empty());
    }

    #[test]
    fn debug_redacts_secret() {
        let cred = ApiCredential::new("super-secret");
        let debug = format!("{cred:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn empty_credential_is_detectable() {
        assert!(ApiCredential::new("").is_empty());
    }
}
