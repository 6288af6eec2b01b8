//! Field validation and password normalization rules.
//!
//! A single rule engine shared by the create and update paths: each present
//! field is checked in the fixed order account, password, email, age, and the
//! first failing field wins. Passwords are never rejected; values inside the
//! 4-20 character window are replaced by their MD5 hex digest before storage,
//! values outside it pass through verbatim (a known limitation carried over
//! from the legacy store - out-of-window passwords end up in plaintext).

use thiserror::Error;
use validator::ValidateEmail;

use crate::models::{CreateUser, UpdateUser};

/// A field that violated its constraint, with the user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationFailure {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

const ACCOUNT_MIN: usize = 4;
const ACCOUNT_MAX: usize = 20;
const AGE_MIN: i32 = 13;
const AGE_MAX: i32 = 110;
const PASSWORD_HASH_MIN: usize = 4;
const PASSWORD_HASH_MAX: usize = 20;

fn check_account(account: &str) -> Result<(), ValidationFailure> {
    let len = account.chars().count();
    if len < ACCOUNT_MIN {
        return Err(ValidationFailure::new(
            "account",
            "account must be at least 4 characters",
        ));
    }
    if len > ACCOUNT_MAX {
        return Err(ValidationFailure::new(
            "account",
            "account must be at most 20 characters",
        ));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), ValidationFailure> {
    if !email.validate_email() {
        return Err(ValidationFailure::new("email", "invalid email address"));
    }
    Ok(())
}

fn check_age(age: i32) -> Result<(), ValidationFailure> {
    if age < AGE_MIN {
        return Err(ValidationFailure::new("age", "age must be at least 13"));
    }
    if age > AGE_MAX {
        return Err(ValidationFailure::new("age", "age must be at most 110"));
    }
    Ok(())
}

/// Replace an in-window password with its MD5 hex digest.
///
/// Deterministic and non-reversible; out-of-window values are returned
/// unchanged rather than rejected.
pub fn normalize_password(password: String) -> String {
    let len = password.chars().count();
    if (PASSWORD_HASH_MIN..=PASSWORD_HASH_MAX).contains(&len) {
        format!("{:x}", md5::compute(password.as_bytes()))
    } else {
        password
    }
}

impl CreateUser {
    /// Validate every field and normalize the password, returning the record
    /// ready for persistence or the first failure in field order.
    pub fn normalized(self) -> Result<Self, ValidationFailure> {
        check_account(&self.account)?;
        let password = normalize_password(self.password);
        check_email(&self.email)?;
        check_age(self.age)?;
        Ok(Self { password, ..self })
    }
}

impl UpdateUser {
    /// Validate and normalize only the fields present in the patch, with the
    /// same rules and field order as creation.
    pub fn normalized(self) -> Result<Self, ValidationFailure> {
        if let Some(ref account) = self.account {
            check_account(account)?;
        }
        let password = self.password.map(normalize_password);
        if let Some(ref email) = self.email {
            check_email(email)?;
        }
        if let Some(age) = self.age {
            check_age(age)?;
        }
        Ok(Self { password, ..self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateUser {
        CreateUser {
            account: "alice1".to_string(),
            password: "pass1234".to_string(),
            email: "a@b.com".to_string(),
            age: 25,
        }
    }

    #[test]
    fn test_valid_record_hashes_password() {
        let normalized = create_input().normalized().unwrap();
        assert_eq!(normalized.password, format!("{:x}", md5::compute("pass1234")));
        assert_eq!(normalized.account, "alice1");
    }

    #[test]
    fn test_password_window_edges() {
        // 3 chars: verbatim, 4 and 20 chars: hashed, 21 chars: verbatim
        assert_eq!(normalize_password("abc".to_string()), "abc");
        assert_eq!(
            normalize_password("abcd".to_string()),
            format!("{:x}", md5::compute("abcd"))
        );
        let twenty = "a".repeat(20);
        assert_eq!(
            normalize_password(twenty.clone()),
            format!("{:x}", md5::compute(&twenty))
        );
        let twenty_one = "a".repeat(21);
        assert_eq!(normalize_password(twenty_one.clone()), twenty_one);
    }

    #[test]
    fn test_normalization_is_deterministic() {
        assert_eq!(
            normalize_password("pass1234".to_string()),
            normalize_password("pass1234".to_string())
        );
    }

    #[test]
    fn test_account_too_short() {
        let failure = CreateUser {
            account: "ab".to_string(),
            ..create_input()
        }
        .normalized()
        .unwrap_err();
        assert_eq!(failure.field, "account");
        assert_eq!(failure.message, "account must be at least 4 characters");
    }

    #[test]
    fn test_account_too_long() {
        let failure = CreateUser {
            account: "a".repeat(21),
            ..create_input()
        }
        .normalized()
        .unwrap_err();
        assert_eq!(failure.message, "account must be at most 20 characters");
    }

    #[test]
    fn test_account_length_counts_characters_not_bytes() {
        // four multibyte characters satisfy the minimum
        let ok = CreateUser {
            account: "測試帳號".to_string(),
            ..create_input()
        }
        .normalized();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let failure = CreateUser {
            email: "not-an-email".to_string(),
            ..create_input()
        }
        .normalized()
        .unwrap_err();
        assert_eq!(failure.field, "email");
        assert_eq!(failure.message, "invalid email address");
    }

    #[test]
    fn test_age_bounds_inclusive() {
        assert!(CreateUser { age: 13, ..create_input() }.normalized().is_ok());
        assert!(CreateUser { age: 110, ..create_input() }.normalized().is_ok());
        assert_eq!(
            CreateUser { age: 12, ..create_input() }
                .normalized()
                .unwrap_err()
                .message,
            "age must be at least 13"
        );
        assert_eq!(
            CreateUser { age: 200, ..create_input() }
                .normalized()
                .unwrap_err()
                .message,
            "age must be at most 110"
        );
    }

    #[test]
    fn test_first_failing_field_wins() {
        // account and email both invalid: the account message is reported
        let failure = CreateUser {
            account: "ab".to_string(),
            email: "broken".to_string(),
            ..create_input()
        }
        .normalized()
        .unwrap_err();
        assert_eq!(failure.field, "account");
    }

    #[test]
    fn test_partial_update_checks_only_present_fields() {
        let patch = UpdateUser {
            age: Some(30),
            ..Default::default()
        };
        let normalized = patch.normalized().unwrap();
        assert_eq!(normalized.age, Some(30));
        assert!(normalized.account.is_none());
    }

    #[test]
    fn test_partial_update_rejects_bad_present_field() {
        let failure = UpdateUser {
            age: Some(200),
            ..Default::default()
        }
        .normalized()
        .unwrap_err();
        assert_eq!(failure.message, "age must be at most 110");
    }

    #[test]
    fn test_partial_update_hashes_password() {
        let patch = UpdateUser {
            password: Some("newpass".to_string()),
            ..Default::default()
        };
        let normalized = patch.normalized().unwrap();
        assert_eq!(
            normalized.password,
            Some(format!("{:x}", md5::compute("newpass")))
        );
    }
}
