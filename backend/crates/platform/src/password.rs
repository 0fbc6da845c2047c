//! One-Way Secret Hashing and Verification
//!
//! NIST SP 800-63B compliant password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time comparison
//!
//! The hash/compare primitive ([`hash_secret`] / [`HashedSecret::matches`])
//! is byte-oriented so the same one-way construction serves both login
//! passwords and password-reset tokens.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants (NIST SP 800-63B compliant)
// ============================================================================

/// Minimum password length (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Hashing/verification errors
#[derive(Debug, Error)]
pub enum SecretHashError {
    /// Hashing operation failed
    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid secret hash format")]
    InvalidHashFormat,
}

// ============================================================================
// One-way primitive
// ============================================================================

/// Hash arbitrary secret bytes with Argon2id
///
/// ## Arguments
/// * `secret` - The plaintext bytes (password or reset token)
/// * `pepper` - Optional application-wide secret appended before hashing
///
/// ## Returns
/// PHC-formatted digest wrapped in [`HashedSecret`]
pub fn hash_secret(secret: &[u8], pepper: Option<&[u8]>) -> Result<HashedSecret, SecretHashError> {
    let mut input = secret.to_vec();
    if let Some(p) = pepper {
        input.extend_from_slice(p);
    }

    // Random 128-bit salt per digest
    let salt = SaltString::generate(OsRng);

    // OWASP recommended Argon2id parameters:
    // m=19456 (19 MiB), t=2, p=1
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(&input, &salt)
        .map_err(|e| SecretHashError::HashingFailed(e.to_string()))?;

    input.zeroize();

    Ok(HashedSecret {
        hash: hash.to_string(),
    })
}

/// One-way digest in PHC string format
///
/// Stores the Argon2id digest in PHC format (algorithm, version,
/// parameters, salt, hash). Safe to persist; the plaintext cannot be
/// recovered, so lookups against it require trial comparison.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedSecret {
    hash: String,
}

impl HashedSecret {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, SecretHashError> {
        let hash = s.into();

        // Validate it's a valid PHC string
        PasswordHash::new(&hash).map_err(|_| SecretHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Compare plaintext bytes against this digest
    ///
    /// Argon2 performs the comparison in constant time.
    ///
    /// ## Arguments
    /// * `secret` - The plaintext bytes to compare
    /// * `pepper` - Must match the pepper used when hashing
    pub fn matches(&self, secret: &[u8], pepper: Option<&[u8]>) -> bool {
        let mut input = secret.to_vec();
        if let Some(p) = pepper {
            input.extend_from_slice(p);
        }

        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let verified = Argon2::default().verify_password(&input, &parsed_hash).is_ok();
        input.zeroize();
        verified
    }
}

impl fmt::Debug for HashedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedSecret")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Validates user input against NIST SP 800-63B requirements and
/// guarantees the plaintext is erased from memory on drop.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// Validates against NIST SP 800-63B requirements:
    /// - Minimum 8 characters
    /// - Maximum 128 characters
    /// - No control characters
    /// - Not empty/whitespace only
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        // NIST: Unicode NFKC normalization before processing
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // NIST: Count Unicode code points (not bytes)
        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters (except space, tab, newline) are rejected
        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n' {
                return Err(PasswordPolicyError::InvalidCharacter);
            }
        }

        Ok(Self(normalized))
    }

    /// Create without policy validation, for verification paths
    ///
    /// Stored digests may predate the current policy, so verification
    /// only normalizes (NFKC) and never rejects on policy grounds.
    pub fn for_verification(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    /// Get the password as bytes for hashing
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret for additional security
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedSecret, SecretHashError> {
        hash_secret(self.as_bytes(), pepper)
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("short".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let result = ClearTextPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new("".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("        ".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_control_characters() {
        let result = ClearTextPassword::new("pass\u{0000}word".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_valid_password() {
        let result = ClearTextPassword::new("MySecure#Pass2024!".to_string());
        assert!(result.is_ok());
    }

    #[test]
    fn test_unicode_password() {
        // Unicode passwords should work
        let result = ClearTextPassword::new("パスワード安全です!".to_string());
        assert!(result.is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = password.hash(None).unwrap();

        // Correct password should verify
        assert!(hashed.matches(password.as_bytes(), None));

        // Wrong password should not verify
        assert!(!hashed.matches(b"WrongPassword123!", None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let pepper = b"my_secret_pepper";
        let hashed = hash_secret(b"TestPassword123!", Some(pepper)).unwrap();

        // Correct secret with correct pepper
        assert!(hashed.matches(b"TestPassword123!", Some(pepper)));

        // Correct secret without pepper should fail
        assert!(!hashed.matches(b"TestPassword123!", None));

        // Correct secret with wrong pepper should fail
        assert!(!hashed.matches(b"TestPassword123!", Some(b"wrong_pepper")));
    }

    #[test]
    fn test_token_material_roundtrip() {
        // The same primitive is used for reset tokens, which are raw bytes
        let token = crate::crypto::random_bytes(32);
        let hashed = hash_secret(&token, None).unwrap();

        assert!(hashed.matches(&token, None));
        assert!(!hashed.matches(&crate::crypto::random_bytes(32), None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hashed = hash_secret(b"TestPassword123!", None).unwrap();

        let phc_string = hashed.as_phc_string().to_string();
        let restored = HashedSecret::from_phc_string(phc_string).unwrap();

        assert!(restored.matches(b"TestPassword123!", None));
    }

    #[test]
    fn test_invalid_phc_string() {
        let result = HashedSecret::from_phc_string("not_a_valid_hash");
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("secret-enough".to_string()).unwrap();
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret-enough"));

        let hashed = password.hash(None).unwrap();
        let debug_output = format!("{:?}", hashed);
        assert!(debug_output.contains("HASH"));
    }
}
