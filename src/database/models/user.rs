use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use super::validate::ValidationErrors;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 128;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern compiles")
});

/// Stored account. `password` always holds an argon2 PHC string.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Registration input that passed every field rule. The password is still
/// plaintext here and must go through the hasher before it reaches a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn parse(
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = errors.required("name", name.map(str::trim), "Please provide name");
        if let Some(name) = name {
            errors.min_len("name", name, NAME_MIN_LEN);
            errors.max_len("name", name, NAME_MAX_LEN);
        }

        let email = errors.required("email", email.map(str::trim), "Please provide email");
        if let Some(email) = email {
            if email.chars().count() > EMAIL_MAX_LEN {
                errors.max_len("email", email, EMAIL_MAX_LEN);
            } else if !is_valid_email(email) {
                errors.add("email", "Please provide a valid email");
            }
        }

        let password = errors.required("password", password, "Please provide password");
        if let Some(password) = password {
            errors.min_len("password", password, PASSWORD_MIN_LEN);
            errors.max_len("password", password, PASSWORD_MAX_LEN);
        }

        errors.into_result()?;

        // All three are Some once no rule failed
        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => Ok(Self {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            }),
            _ => Err(ValidationErrors::new()),
        }
    }

    /// Builds the record to persist, replacing the plaintext with its hash.
    pub fn into_user(self, password_hash: String) -> User {
        User {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email,
            password: password_hash,
            created_at: Utc::now(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_registration() {
        let user = NewUser::parse(Some(" Ada "), Some("ada@x.com"), Some("secret1")).unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@x.com");
    }

    #[test]
    fn reports_every_missing_field() {
        let err = NewUser::parse(None, None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please provide name,Please provide email,Please provide password"
        );
    }

    #[test]
    fn enforces_length_bounds() {
        let err = NewUser::parse(Some("Al"), Some("al@x.com"), Some("12345")).unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("password"));
        assert!(!err.has_field("email"));

        let long_name = "a".repeat(NAME_MAX_LEN + 1);
        assert!(NewUser::parse(Some(&long_name), Some("a@x.com"), Some("secret1")).is_err());

        let long_password = "p".repeat(PASSWORD_MAX_LEN + 1);
        let err = NewUser::parse(Some("Ada"), Some("a@x.com"), Some(&long_password)).unwrap_err();
        assert!(err.has_field("password"));

        let max_password = "p".repeat(PASSWORD_MAX_LEN);
        assert!(NewUser::parse(Some("Ada"), Some("a@x.com"), Some(&max_password)).is_ok());
    }

    #[test]
    fn rejects_overlong_email() {
        let long_email = format!("{}@x.com", "a".repeat(400));
        let err = NewUser::parse(Some("Ada"), Some(&long_email), Some("secret1")).unwrap_err();
        assert!(err.has_field("email"));
        assert_eq!(err.to_string(), "email must be at most 254 characters");

        let local = "a".repeat(EMAIL_MAX_LEN - "@x.com".len());
        let max_email = format!("{}@x.com", local);
        assert!(NewUser::parse(Some("Ada"), Some(&max_email), Some("secret1")).is_ok());
    }

    #[test]
    fn email_format() {
        assert!(is_valid_email("ada@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(is_valid_email("ada@[127.0.0.1]"));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@x"));
        assert!(!is_valid_email("ada@@x.com"));
        assert!(!is_valid_email("a da@x.com"));
    }

    #[test]
    fn serialized_user_hides_password() {
        let user = NewUser::parse(Some("Ada"), Some("ada@x.com"), Some("secret1"))
            .unwrap()
            .into_user("$argon2id$fake".to_string());
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["name"], "Ada");
    }
}
