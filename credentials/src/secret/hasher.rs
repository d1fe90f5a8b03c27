use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::SecretError;

/// One-way secret hashing with Argon2id.
///
/// The time-cost is tunable per deployment; memory and parallelism stay
/// at the crate defaults. Every parameter ends up embedded in the PHC
/// output string, so verification recovers them from the verifier itself
/// and old verifiers keep working after the cost is re-tuned.
pub struct SecretHasher {
    argon2: Argon2<'static>,
}

impl SecretHasher {
    /// Create a hasher with the given Argon2 time-cost.
    ///
    /// # Arguments
    /// * `cost` - Iteration count applied when hashing new secrets
    ///
    /// # Errors
    /// * `InvalidCost` - Cost of zero or otherwise rejected parameters
    pub fn new(cost: u32) -> Result<Self, SecretError> {
        let params = Params::new(Params::DEFAULT_M_COST, cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| SecretError::InvalidCost(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext secret into a storable verifier.
    ///
    /// A fresh random salt is drawn per call, so hashing the same secret
    /// twice yields two different verifiers.
    ///
    /// # Arguments
    /// * `plaintext` - Secret to hash
    ///
    /// # Returns
    /// PHC string format verifier (algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing primitive failed; fatal to the calling
    ///   operation
    pub fn hash(&self, plaintext: &str) -> Result<String, SecretError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| SecretError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext secret against a stored verifier.
    ///
    /// Recomputes the hash with the salt and cost embedded in `verifier`
    /// and compares in constant time with respect to the secret. A
    /// mismatch is the normal `false` outcome, not an error.
    ///
    /// # Arguments
    /// * `plaintext` - Secret to check
    /// * `verifier` - Stored verifier in PHC string format
    ///
    /// # Errors
    /// * `VerificationFailed` - Verifier string is unparseable
    pub fn verify(&self, plaintext: &str, verifier: &str) -> Result<bool, SecretError> {
        let parsed = PasswordHash::new(verifier)
            .map_err(|e| SecretError::VerificationFailed(format!("Invalid verifier: {}", e)))?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(SecretError::VerificationFailed(e.to_string())),
        }
    }
}
