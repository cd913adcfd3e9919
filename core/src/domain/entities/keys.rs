//! Persisted signing key material.

use serde::{Deserialize, Serialize};

/// A freshly generated ES256 key pair in PEM form.
///
/// The private key is PKCS#8 encoded, the public key SPKI encoded, so both
/// can be handed to the JWT layer unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPairPem {
    pub private_pem: String,
    pub public_pem: String,
}

/// The durable key configuration blob.
///
/// Holds the current signing pair for each token class plus, after the first
/// rotation, the immediately previous public key. Only one prior generation
/// is retained; the next rotation discards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMaterial {
    /// Current access signing key (PEM, private)
    pub access_private_pem: String,

    /// Current access verification key (PEM, public)
    pub access_public_pem: String,

    /// Previous access verification key, retained for one generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_access_public_pem: Option<String>,

    /// Current refresh signing key (PEM, private)
    pub refresh_private_pem: String,

    /// Current refresh verification key (PEM, public)
    pub refresh_public_pem: String,

    /// Previous refresh verification key, retained for one generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_refresh_public_pem: Option<String>,
}

impl KeyMaterial {
    /// Builds first-generation material from two fresh pairs; no previous
    /// keys exist yet.
    pub fn initial(access: KeyPairPem, refresh: KeyPairPem) -> Self {
        Self {
            access_private_pem: access.private_pem,
            access_public_pem: access.public_pem,
            previous_access_public_pem: None,
            refresh_private_pem: refresh.private_pem,
            refresh_public_pem: refresh.public_pem,
            previous_refresh_public_pem: None,
        }
    }

    /// Builds the next generation: the supplied pairs become current and the
    /// old current public keys are demoted to previous.
    pub fn rotated(&self, access: KeyPairPem, refresh: KeyPairPem) -> Self {
        Self {
            previous_access_public_pem: Some(self.access_public_pem.clone()),
            access_private_pem: access.private_pem,
            access_public_pem: access.public_pem,
            previous_refresh_public_pem: Some(self.refresh_public_pem.clone()),
            refresh_private_pem: refresh.private_pem,
            refresh_public_pem: refresh.public_pem,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(tag: &str) -> KeyPairPem {
        KeyPairPem {
            private_pem: format!("{tag}-private"),
            public_pem: format!("{tag}-public"),
        }
    }

    #[test]
    fn test_initial_material_has_no_previous_keys() {
        let material = KeyMaterial::initial(pair("a"), pair("r"));
        assert!(material.previous_access_public_pem.is_none());
        assert!(material.previous_refresh_public_pem.is_none());
    }

    #[test]
    fn test_rotation_demotes_current_public_keys() {
        let first = KeyMaterial::initial(pair("a1"), pair("r1"));
        let second = first.rotated(pair("a2"), pair("r2"));

        assert_eq!(second.access_public_pem, "a2-public");
        assert_eq!(
            second.previous_access_public_pem.as_deref(),
            Some("a1-public")
        );
        assert_eq!(
            second.previous_refresh_public_pem.as_deref(),
            Some("r1-public")
        );

        // A second rotation discards the first generation entirely.
        let third = second.rotated(pair("a3"), pair("r3"));
        assert_eq!(
            third.previous_access_public_pem.as_deref(),
            Some("a2-public")
        );
    }
}
