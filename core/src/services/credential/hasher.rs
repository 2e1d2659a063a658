use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::DomainError;

/// Lowest cost bcrypt accepts; only suitable for tests
pub const MIN_COST: u32 = 4;

/// One-way salted hashing of passwords
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl CredentialHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt
    ///
    /// # Returns
    /// * `Ok(String)` - bcrypt digest (starts with `$2b$`)
    /// * `Err(DomainError::Internal)` - bcrypt rejected the input or cost
    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    /// Check a password against a stored digest
    ///
    /// A corrupted or unsupported digest counts as a mismatch.
    pub fn verify(&self, digest: &str, password: &str) -> bool {
        verify(password, digest).unwrap_or(false)
    }
}
