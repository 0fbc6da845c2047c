//! User Name Value Object
//!
//! ユーザー名はログインと表示に使う一意なハンドル。パスワードリセットの
//! 送付先アドレスを兼ねるため、メールアドレス形の値も受け付ける。
//!
//! ## 設計方針
//! - ASCII のみ許可（a-z, 0-9 と `_ . - + @`）
//! - 大文字入力は受け付けるが、canonical（正規形）は小文字
//! - NFKC 正規化 → 検証 → 小文字化 の順で処理
//!
//! ## 不変条件
//! - 長さ: 3〜64 文字（正規化後）
//! - 英数字を最低 1 文字含む（記号のみ禁止）
//! - 先頭・末尾のドット禁止、連続ドット禁止（`..`）
//! - 空白禁止、予約語禁止

use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-', '+', '@'];

/// Reserved words that cannot be used as user names
const RESERVED_WORDS: &[&str] = &[
    "admin",
    "administrator",
    "root",
    "system",
    "support",
    "api",
    "auth",
    "login",
    "logout",
    "register",
    "password",
    "reset",
    "me",
    "anonymous",
    "deleted",
];

// ============================================================================
// Error type
// ============================================================================

/// User name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name must be at least {USER_NAME_MIN_LENGTH} characters")]
    TooShort,

    #[error("User name must be at most {USER_NAME_MAX_LENGTH} characters")]
    TooLong,

    #[error("User name contains an invalid character: {0:?}")]
    InvalidCharacter(char),

    #[error("User name must contain at least one letter or digit")]
    NoAlphanumeric,

    #[error("User name cannot start or end with a dot, or contain consecutive dots")]
    BadDotPlacement,

    #[error("User name is reserved")]
    Reserved,
}

// ============================================================================
// Value object
// ============================================================================

/// Validated user name
///
/// Keeps the original casing for display and a lowercase canonical form
/// for uniqueness and lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a validated user name from raw input
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let raw: String = raw.into();
        let normalized: String = raw.nfkc().collect();
        let trimmed = normalized.trim();

        let char_count = trimmed.chars().count();
        if char_count < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort);
        }
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong);
        }

        let mut has_alphanumeric = false;
        for ch in trimmed.chars() {
            if ch.is_ascii_alphanumeric() {
                has_alphanumeric = true;
            } else if !ALLOWED_SPECIAL_CHARS.contains(&ch) {
                return Err(UserNameError::InvalidCharacter(ch));
            }
        }
        if !has_alphanumeric {
            return Err(UserNameError::NoAlphanumeric);
        }

        if trimmed.starts_with('.') || trimmed.ends_with('.') || trimmed.contains("..") {
            return Err(UserNameError::BadDotPlacement);
        }

        let canonical = trimmed.to_ascii_lowercase();
        if RESERVED_WORDS.contains(&canonical.as_str()) {
            return Err(UserNameError::Reserved);
        }

        Ok(Self {
            original: trimmed.to_string(),
            canonical,
        })
    }

    /// Restore from a stored value, bypassing validation
    ///
    /// The database only holds values that passed [`UserName::new`].
    pub fn from_db(stored: &str) -> Self {
        Self {
            original: stored.to_string(),
            canonical: stored.to_ascii_lowercase(),
        }
    }

    /// Original casing, for display and mail delivery
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase canonical form, for uniqueness and lookups
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_handles() {
        assert!(UserName::new("alice").is_ok());
        assert!(UserName::new("alice_92").is_ok());
        assert!(UserName::new("alice.b-c+d").is_ok());
    }

    #[test]
    fn test_email_shaped_handles() {
        let name = UserName::new("Alice@Example.org").unwrap();
        assert_eq!(name.original(), "Alice@Example.org");
        assert_eq!(name.canonical(), "alice@example.org");
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(UserName::new("ab"), Err(UserNameError::TooShort));
        assert!(UserName::new("abc").is_ok());
        let long = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert_eq!(UserName::new(long), Err(UserNameError::TooLong));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            UserName::new("alice bob"),
            Err(UserNameError::InvalidCharacter(' '))
        ));
        assert!(matches!(
            UserName::new("alice#1"),
            Err(UserNameError::InvalidCharacter('#'))
        ));
        assert!(matches!(
            UserName::new("アリス"),
            Err(UserNameError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_symbols_only_rejected() {
        assert_eq!(UserName::new("._-"), Err(UserNameError::NoAlphanumeric));
    }

    #[test]
    fn test_dot_placement() {
        assert_eq!(UserName::new(".alice"), Err(UserNameError::BadDotPlacement));
        assert_eq!(UserName::new("alice."), Err(UserNameError::BadDotPlacement));
        assert_eq!(
            UserName::new("ali..ce"),
            Err(UserNameError::BadDotPlacement)
        );
    }

    #[test]
    fn test_reserved_words() {
        assert_eq!(UserName::new("admin"), Err(UserNameError::Reserved));
        assert_eq!(UserName::new("Admin"), Err(UserNameError::Reserved));
        assert!(UserName::new("admin2").is_ok());
    }

    #[test]
    fn test_canonical_lowercase() {
        let name = UserName::new("Alice").unwrap();
        assert_eq!(name.original(), "Alice");
        assert_eq!(name.canonical(), "alice");
    }

    #[test]
    fn test_nfkc_normalization() {
        // Full-width input normalizes to ASCII before validation
        let name = UserName::new("ａｌｉｃｅ").unwrap();
        assert_eq!(name.canonical(), "alice");
    }
}
