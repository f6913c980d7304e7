//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifiers that flow through the stack.
//! These prevent accidental identifier confusion — you cannot pass a
//! `RequestId` where a `Cid` is expected.
//!
//! ## Invariants
//!
//! Both newtypes have private inner fields and validating constructors.
//! A `Cid` is non-empty and whitespace-free by construction, so any code
//! holding one knows it refers to content that was actually addressed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from identifier construction.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The identifier string was empty or whitespace-only.
    #[error("{kind} must not be empty")]
    Empty {
        /// Which identifier kind was being constructed.
        kind: &'static str,
    },

    /// The identifier contained whitespace.
    #[error("{kind} must not contain whitespace: {value:?}")]
    Whitespace {
        /// Which identifier kind was being constructed.
        kind: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Opaque, store-assigned identifier of a certificate request record.
///
/// The document collection assigns these; the core never fabricates or
/// interprets them. Deserialization routes through [`RequestId::new`],
/// so a decoded identifier is as valid as a constructed one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct RequestId(String);

impl RequestId {
    /// Wrap a store-assigned identifier. Rejects empty strings.
    pub fn new(id: impl Into<String>) -> Result<Self, IdentityError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdentityError::Empty { kind: "request id" });
        }
        Ok(Self(id))
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RequestId {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A content identifier returned by the blob store.
///
/// Derived from a blob's content; used to retrieve it from the
/// content-addressed store. Non-empty and whitespace-free by
/// construction — the inner value cannot be mutated afterwards, and
/// deserialization routes through [`Cid::new`], so a decoded store
/// response cannot smuggle in a blank CID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Cid(String);

impl Cid {
    /// Wrap a store-returned content identifier.
    ///
    /// Rejects empty or whitespace-containing strings: a blank CID means
    /// the upload never happened, and must not flow further.
    pub fn new(cid: impl Into<String>) -> Result<Self, IdentityError> {
        let cid = cid.into();
        if cid.is_empty() {
            return Err(IdentityError::Empty { kind: "cid" });
        }
        if cid.chars().any(char::is_whitespace) {
            return Err(IdentityError::Whitespace {
                kind: "cid",
                value: cid,
            });
        }
        Ok(Self(cid))
    }

    /// Return the CID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the resolution URI `scheme://<cid>` understood by downstream
    /// verifiers. The scheme is opaque to the core.
    pub fn uri(&self, scheme: &str) -> String {
        format!("{scheme}://{}", self.0)
    }
}

impl std::fmt::Display for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Cid {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_accepts_opaque_strings() {
        let id = RequestId::new("a1B2-c3").unwrap();
        assert_eq!(id.as_str(), "a1B2-c3");
        assert_eq!(id.to_string(), "a1B2-c3");
    }

    #[test]
    fn request_id_rejects_empty() {
        assert!(RequestId::new("").is_err());
        assert!(RequestId::new("   ").is_err());
    }

    #[test]
    fn cid_accepts_store_values() {
        let cid = Cid::new("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG").unwrap();
        assert_eq!(cid.as_str(), "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
    }

    #[test]
    fn cid_rejects_empty() {
        let err = Cid::new("").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn cid_rejects_whitespace() {
        assert!(Cid::new("Qm abc").is_err());
        assert!(Cid::new("Qmabc\n").is_err());
    }

    #[test]
    fn cid_uri_renders_scheme() {
        let cid = Cid::new("bafy123").unwrap();
        assert_eq!(cid.uri("ipfs"), "ipfs://bafy123");
    }

    #[test]
    fn cid_serde_is_transparent() {
        let cid = Cid::new("bafy123").unwrap();
        let json = serde_json::to_string(&cid).unwrap();
        assert_eq!(json, "\"bafy123\"");
        let back: Cid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cid);
    }

    #[test]
    fn deserialization_enforces_construction_rules() {
        // A decoded value must satisfy the same invariants as a
        // constructed one; blank or whitespace identifiers are refused
        // at the serde boundary.
        assert!(serde_json::from_str::<Cid>("\"\"").is_err());
        assert!(serde_json::from_str::<Cid>("\"Qm abc\"").is_err());
        assert!(serde_json::from_str::<RequestId>("\"\"").is_err());
        assert!(serde_json::from_str::<RequestId>("\"   \"").is_err());

        let cid: Cid = serde_json::from_str("\"bafyOk\"").unwrap();
        assert_eq!(cid.as_str(), "bafyOk");
    }
}
