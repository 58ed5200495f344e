//! Account records.
//!
//! An account is created from a plain-text password that is hashed before the
//! record leaves the build step; only the salt/hash pair is ever persisted.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::password::{is_phc_string, PasswordDigest};
use crate::validation::{RuleChain, Schema};

/// Store collection holding accounts.
pub const ACCOUNTS_COLLECTION: &str = "accounts";

/// Account creation input as supplied by callers.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInput {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// A validated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Salted password hash.
    pub password: PasswordDigest,
}

/// The stored shape of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Hex-encoded salt.
    pub salt: String,
    /// Hex-encoded password hash.
    pub encrypted_password: String,
}

impl From<&Account> for AccountPayload {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            username: account.username.clone(),
            salt: account.password.salt.clone(),
            encrypted_password: account.password.hash.clone(),
        }
    }
}

impl From<AccountPayload> for Account {
    fn from(payload: AccountPayload) -> Self {
        Self {
            name: payload.name,
            username: payload.username,
            password: PasswordDigest {
                salt: payload.salt,
                hash: payload.encrypted_password,
            },
        }
    }
}

fn name_rules() -> RuleChain {
    RuleChain::new()
        .required("name must be present")
        .is_string("name must be text")
        .max_length(32, "name must be at most 32 characters long")
        .min_length(8, "name must be at least 8 characters long")
        .title_case("name must be title-cased")
}

fn username_rules() -> RuleChain {
    RuleChain::new()
        .required("username must be present")
        .is_string("username must be text")
        .max_length(20, "username must be at most 20 characters long")
        .min_length(4, "username must be at least 4 characters long")
        .custom(
            |value| {
                value
                    .as_str()
                    .is_some_and(|s| s.chars().all(|c| c.is_ascii_alphabetic() || c == '_'))
            },
            "username may only contain letters and underscores",
        )
}

fn salt_rules() -> RuleChain {
    RuleChain::new().required("salt must be present").custom(
        |value: &Value| {
            value.as_str().is_some_and(|s| {
                !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/')
            })
        },
        "salt must be B64 encoded",
    )
}

fn phc_rules() -> RuleChain {
    RuleChain::new()
        .required("encryptedPassword must be present")
        .custom(
            |value: &Value| value.as_str().is_some_and(is_phc_string),
            "encryptedPassword must be an argon2 PHC string",
        )
}

/// Rules applied to caller input.
#[must_use]
pub fn input_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new()
            .field("name", name_rules())
            .field("username", username_rules())
            .field(
                "password",
                RuleChain::new()
                    .required("password must be present")
                    .is_string("password must be text")
                    .min_length(8, "password must be at least 8 characters long")
                    .max_length(64, "password must be at most 64 characters long")
                    .has_digits("password must contain a digit")
                    .has_uppercase("password must contain an uppercase letter")
                    .has_lowercase("password must contain a lowercase letter"),
            )
    })
}

/// Rules applied to stored documents on rehydration.
#[must_use]
pub fn payload_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new()
            .field("name", name_rules())
            .field("username", username_rules())
            .field("salt", salt_rules())
            .field("encryptedPassword", phc_rules())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_object;
    use serde_json::json;

    fn valid_input() -> Value {
        json!({ "name": "Jane Smith Doe", "username": "jane_smith", "password": "Abcd1234" })
    }

    #[test]
    fn valid_input_passes() {
        assert!(validate_object(&valid_input(), input_schema()).is_ok());
    }

    #[test]
    fn name_must_be_title_cased() {
        let mut input = valid_input();
        input["name"] = json!("jane smith doe");
        let err = validate_object(&input, input_schema()).unwrap_err();
        assert_eq!(err.message(), "name must be title-cased");
    }

    #[test]
    fn username_rejects_digits() {
        let mut input = valid_input();
        input["username"] = json!("jane42");
        let err = validate_object(&input, input_schema()).unwrap_err();
        assert_eq!(err.message(), "username may only contain letters and underscores");
    }

    #[test]
    fn name_error_reported_before_password_error() {
        let input = json!({ "name": "Jo", "username": "jane_smith", "password": "x" });
        let err = validate_object(&input, input_schema()).unwrap_err();
        assert_eq!(err.message(), "name must be at least 8 characters long");
    }

    #[test]
    fn password_requires_digit() {
        let mut input = valid_input();
        input["password"] = json!("Abcdefgh");
        let err = validate_object(&input, input_schema()).unwrap_err();
        assert_eq!(err.message(), "password must contain a digit");
    }

    const SALT: &str = "c2FsdHNhbHRzYWx0";
    const PHC: &str = "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHRzYWx0$2J0SOPvA8uGn/PLyWBsljg";

    fn stored_payload() -> Value {
        json!({
            "name": "Jane Smith Doe",
            "username": "jane_smith",
            "salt": SALT,
            "encryptedPassword": PHC
        })
    }

    #[test]
    fn payload_roundtrip_preserves_digest() {
        let account = Account {
            name: "Jane Smith Doe".into(),
            username: "jane_smith".into(),
            password: PasswordDigest {
                salt: SALT.into(),
                hash: PHC.into(),
            },
        };
        let payload = AccountPayload::from(&account);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["encryptedPassword"], PHC);
        assert!(validate_object(&json, payload_schema()).is_ok());
        assert_eq!(Account::from(payload), account);
    }

    #[test]
    fn payload_schema_rejects_missing_hash() {
        let json = json!({ "name": "Jane Smith Doe", "username": "jane_smith", "salt": SALT });
        let err = validate_object(&json, payload_schema()).unwrap_err();
        assert_eq!(err.message(), "encryptedPassword must be present");
    }

    #[test]
    fn payload_schema_rejects_legacy_hex_digest() {
        let mut json = stored_payload();
        json["encryptedPassword"] = json!("abcd");
        let err = validate_object(&json, payload_schema()).unwrap_err();
        assert_eq!(err.message(), "encryptedPassword must be an argon2 PHC string");
    }

    #[test]
    fn payload_schema_rejects_non_b64_salt() {
        let mut json = stored_payload();
        json["salt"] = json!("not a salt!");
        let err = validate_object(&json, payload_schema()).unwrap_err();
        assert_eq!(err.message(), "salt must be B64 encoded");
    }
}
