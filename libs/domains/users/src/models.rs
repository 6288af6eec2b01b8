use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User entity - one registered account stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB), assigned once at
    /// insertion and immutable thereafter
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Account name, unique across all records
    pub account: String,
    /// Stored credential: the MD5 hex digest of the submitted password when
    /// the submitted value was 4-20 characters, the verbatim value otherwise
    pub password: String,
    /// Email address, unique across all records
    pub email: String,
    /// Age in years
    pub age: i32,
}

/// DTO for registering a new user. All fields are required.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    pub account: String,
    pub password: String,
    pub email: String,
    pub age: i32,
}

/// DTO for partially updating an existing user. Absent fields are left
/// untouched; present fields are validated with the same rules as creation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    pub account: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl UpdateUser {
    /// True when no field is present, i.e. the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.account.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.age.is_none()
    }
}

/// Outbound representation of a user. The password never leaves the service,
/// so this type simply has no password field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    pub id: Uuid,
    pub account: String,
    pub email: String,
    pub age: i32,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            account: user.account,
            email: user.email,
            age: user.age,
        }
    }
}

impl User {
    /// Build a new user from an already-normalized CreateUser DTO,
    /// assigning the identifier
    pub fn new(input: CreateUser) -> Self {
        Self {
            id: Uuid::now_v7(),
            account: input.account,
            password: input.password,
            email: input.email,
            age: input.age,
        }
    }
}

/// Uniform response envelope returned by every operation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful envelope with an empty message
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            result: Some(result),
        }
    }

    /// Failure envelope carrying the user-facing message, no result
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::now_v7(),
            account: "alice1".to_string(),
            password: "bcf9eb49f5f4910ba7cb0a1a0c548f46".to_string(),
            email: "a@b.com".to_string(),
            age: 25,
        }
    }

    #[test]
    fn test_public_user_has_no_password_key() {
        let public = PublicUser::from(sample_user());
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["account"], "alice1");
        assert_eq!(json["age"], 25);
    }

    #[test]
    fn test_envelope_ok_shape() {
        let envelope = Envelope::ok(PublicUser::from(sample_user()));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "");
        assert!(json["result"].is_object());
    }

    #[test]
    fn test_envelope_fail_omits_result() {
        let envelope = Envelope::<PublicUser>::fail("account not found");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "account not found");
        assert!(json.get("result").is_none());
    }

    #[test]
    fn test_update_user_is_empty() {
        assert!(UpdateUser::default().is_empty());
        let patch = UpdateUser {
            age: Some(30),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_user_new_assigns_identifier() {
        let a = User::new(CreateUser {
            account: "alice1".to_string(),
            password: "x".to_string(),
            email: "a@b.com".to_string(),
            age: 25,
        });
        let b = User::new(CreateUser {
            account: "alice1".to_string(),
            password: "x".to_string(),
            email: "a@b.com".to_string(),
            age: 25,
        });
        assert_ne!(a.id, b.id);
    }
}
