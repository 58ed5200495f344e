//! Password hashing.
//!
//! Account passwords are stored as a salt plus an Argon2id PHC string. The
//! hashing primitive sits behind [`PasswordHasher`] so the account controller
//! never depends on a concrete algorithm.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier, Version};
use serde::{Deserialize, Serialize};

/// Salted password material as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordDigest {
    /// B64-encoded salt, as embedded in `hash`.
    pub salt: String,
    /// Argon2id PHC string (`$argon2id$v=19$...`).
    pub hash: String,
}

/// A password could not be hashed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {reason}")]
pub struct PasswordError {
    /// Failure reported by the hashing primitive.
    pub reason: String,
}

/// An opaque password-hashing primitive.
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` under a freshly generated salt.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError`] if the primitive rejects its parameters.
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordError>;

    /// Check `password` against a stored digest.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool;
}

/// Argon2id with a random per-password salt from the OS RNG.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Use explicit cost parameters instead of the argon2 defaults.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError {
                reason: e.to_string(),
            })?;

        Ok(PasswordDigest {
            salt: salt.as_str().to_owned(),
            hash: hash.to_string(),
        })
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool {
        let Ok(parsed) = PasswordHash::new(&digest.hash) else {
            return false;
        };
        if parsed.salt.map(|s| s.as_str()) != Some(digest.salt.as_str()) {
            return false;
        }

        // Cost parameters come from the PHC string, not from `self`.
        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Whether `value` is a parseable Argon2 PHC string.
#[must_use]
pub fn is_phc_string(value: &str) -> bool {
    PasswordHash::new(value).is_ok_and(|h| h.algorithm.as_str().starts_with("argon2"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimum-cost parameters keep unit tests fast.
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(Params::new(Params::MIN_M_COST, 1, 1, None).unwrap())
    }

    #[test]
    fn hash_then_verify() {
        let hasher = hasher();
        let digest = hasher.hash("Abcd1234").unwrap();
        assert!(hasher.verify("Abcd1234", &digest));
        assert!(!hasher.verify("abcd1234", &digest));
    }

    #[test]
    fn digest_is_argon2id_phc_string() {
        let digest = hasher().hash("secret").unwrap();
        assert!(digest.hash.starts_with("$argon2id$v=19$"));
        assert!(digest.hash.contains(&digest.salt));
        assert!(is_phc_string(&digest.hash));
    }

    #[test]
    fn default_params_are_argon2_defaults() {
        let digest = Argon2PasswordHasher::default().hash("secret").unwrap();
        let parsed = PasswordHash::new(&digest.hash).unwrap();
        let params = Params::try_from(&parsed).unwrap();
        assert_eq!(params.m_cost(), Params::DEFAULT_M_COST);
        assert_eq!(params.t_cost(), Params::DEFAULT_T_COST);
    }

    #[test]
    fn verify_reads_cost_from_digest() {
        let digest = hasher().hash("Abcd1234").unwrap();
        assert!(Argon2PasswordHasher::default().verify("Abcd1234", &digest));
    }

    #[test]
    fn salts_differ_between_calls() {
        let hasher = hasher();
        let a = hasher.hash("same").unwrap();
        let b = hasher.hash("same").unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn mismatched_salt_never_verifies() {
        let hasher = hasher();
        let mut digest = hasher.hash("Abcd1234").unwrap();
        digest.salt = hasher.hash("other").unwrap().salt;
        assert!(!hasher.verify("Abcd1234", &digest));
    }

    #[test]
    fn corrupt_digest_never_verifies() {
        let digest = PasswordDigest {
            salt: "not-a-salt".into(),
            hash: "zz".into(),
        };
        assert!(!hasher().verify("anything", &digest));
        assert!(!is_phc_string("zz"));
    }
}
