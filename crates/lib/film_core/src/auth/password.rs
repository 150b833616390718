//! Password hashing via bcrypt.

use super::AuthError;

/// Default bcrypt cost factor.
pub const DEFAULT_COST: u32 = 10;

/// One-way adaptive password hasher with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password with a fresh random salt. The digest embeds salt and cost.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
    }

    /// Verify a password against a bcrypt digest.
    ///
    /// A malformed digest is reported as a mismatch, not an error.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lowest cost bcrypt accepts; keeps tests fast.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn hash_and_verify() {
        let h = hasher();
        let digest = h.hash("my_secure_password").unwrap();

        assert!(h.verify("my_secure_password", &digest));
        assert!(!h.verify("wrong_password", &digest));
    }

    #[test]
    fn salts_differ_per_call() {
        let h = hasher();
        let a = h.hash("same_password").unwrap();
        let b = h.hash("same_password").unwrap();

        assert_ne!(a, b);
        assert!(h.verify("same_password", &a));
        assert!(h.verify("same_password", &b));
    }

    #[test]
    fn malformed_digest_is_a_mismatch() {
        let h = hasher();
        assert!(!h.verify("anything", "not-a-bcrypt-hash"));
        assert!(!h.verify("anything", ""));
    }
}
