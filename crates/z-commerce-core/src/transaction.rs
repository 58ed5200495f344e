//! Transaction records and their lifecycle.
//!
//! A transaction references one account and one catalog item by identifier.
//! It starts `active` and can be canceled; cancellation rewrites the state
//! field and keeps the record.
//!
//! ```text
//!   pending (reserved)
//!
//!   active ──cancel──► canceled ──cancel──► canceled
//! ```

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::DocumentId;
use crate::validation::{RuleChain, Schema};

/// Store collection holding transactions.
pub const TRANSACTIONS_COLLECTION: &str = "transactions";

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    /// Reserved. Nothing creates or leaves this state today.
    Pending,
    /// Recorded and in effect.
    Active,
    /// Canceled by the caller; the record is kept.
    Canceled,
}

impl TransactionState {
    /// Field value as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Canceled => "canceled",
        }
    }

    /// Apply a cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] for `pending`, which has no defined
    /// transitions.
    pub fn cancel(self) -> Result<Cancellation, TransitionError> {
        match self {
            Self::Active => Ok(Cancellation::Canceled),
            Self::Canceled => Ok(Cancellation::AlreadyCanceled),
            Self::Pending => Err(TransitionError {
                from: self,
                to: Self::Canceled,
            }),
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`TransactionState::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cancellation {
    /// The state moved from `active` to `canceled`.
    Canceled,
    /// The transaction was already canceled; nothing changes.
    AlreadyCanceled,
}

/// A state change the lifecycle does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a {from} transaction cannot become {to}")]
pub struct TransitionError {
    /// Current state.
    pub from: TransactionState,
    /// Requested state.
    pub to: TransactionState,
}

/// Transaction creation input as supplied by callers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    /// Referenced account.
    pub user: DocumentId,
    /// Referenced catalog item.
    pub product: DocumentId,
    /// Quantity purchased.
    pub amount_of_product: u32,
}

/// A validated transaction. Also the stored shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Referenced account.
    pub user: DocumentId,
    /// Referenced catalog item.
    pub product: DocumentId,
    /// Quantity purchased.
    pub amount_of_product: u32,
    /// Creation time, assigned by the server.
    pub date: DateTime<Utc>,
    /// Lifecycle state.
    pub state: TransactionState,
}

impl Transaction {
    /// Open a new `active` transaction stamped with `date`.
    #[must_use]
    pub fn open(input: TransactionInput, date: DateTime<Utc>) -> Self {
        Self {
            user: input.user,
            product: input.product,
            amount_of_product: input.amount_of_product,
            date,
            state: TransactionState::Active,
        }
    }
}

fn reference_rules(what: &'static str) -> RuleChain {
    RuleChain::new()
        .required(format!("the {what} id must be present"))
        .is_string(format!("the {what} id must be text"))
}

fn quantity_rules() -> RuleChain {
    RuleChain::new()
        .required("amount of product must be present")
        .is_number("amount of product must be a number")
        .is_integer("amount of product must be a whole number")
        .is_greater_than_zero("amount of product must be greater than zero")
}

/// Rules applied to caller input.
#[must_use]
pub fn input_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new()
            .field("user", reference_rules("account"))
            .field("product", reference_rules("catalog item"))
            .field("amountOfProduct", quantity_rules())
    })
}

/// Rules applied to stored documents on rehydration.
#[must_use]
pub fn payload_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new()
            .field("user", reference_rules("account"))
            .field("product", reference_rules("catalog item"))
            .field("amountOfProduct", quantity_rules())
            .field(
                "date",
                RuleChain::new()
                    .required("date must be present")
                    .custom(
                        |value| {
                            value
                                .as_str()
                                .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok())
                        },
                        "date must be an RFC 3339 timestamp",
                    ),
            )
            .field(
                "state",
                RuleChain::new()
                    .required("state must be present")
                    .custom(
                        |value| {
                            matches!(value.as_str(), Some("pending" | "active" | "canceled"))
                        },
                        "state must be one of pending, active, canceled",
                    ),
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_into, validate_object};
    use serde_json::json;

    #[test]
    fn active_cancels_once() {
        assert_eq!(TransactionState::Active.cancel(), Ok(Cancellation::Canceled));
        assert_eq!(
            TransactionState::Canceled.cancel(),
            Ok(Cancellation::AlreadyCanceled)
        );
    }

    #[test]
    fn pending_cannot_be_canceled() {
        let err = TransactionState::Pending.cancel().unwrap_err();
        assert_eq!(err.to_string(), "a pending transaction cannot become canceled");
    }

    #[test]
    fn state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(TransactionState::Canceled).unwrap(),
            json!("canceled")
        );
    }

    #[test]
    fn open_starts_active() {
        let input: TransactionInput = validate_into(
            json!({ "user": "U1", "product": "P1", "amountOfProduct": 2 }),
            input_schema(),
        )
        .unwrap();
        let tx = Transaction::open(input, Utc::now());
        assert_eq!(tx.state, TransactionState::Active);
        assert_eq!(tx.amount_of_product, 2);
    }

    #[test]
    fn quantity_must_be_positive() {
        let err = validate_object(
            &json!({ "user": "U1", "product": "P1", "amountOfProduct": 0 }),
            input_schema(),
        )
        .unwrap_err();
        assert_eq!(err.message(), "amount of product must be greater than zero");
    }

    #[test]
    fn missing_user_reported_first() {
        let err = validate_object(&json!({ "amountOfProduct": -1 }), input_schema()).unwrap_err();
        assert_eq!(err.message(), "the account id must be present");
    }

    #[test]
    fn stored_shape_roundtrips_through_payload_schema() {
        let tx = Transaction {
            user: DocumentId::parse("U1").unwrap(),
            product: DocumentId::parse("P1").unwrap(),
            amount_of_product: 3,
            date: Utc::now(),
            state: TransactionState::Canceled,
        };
        let stored = serde_json::to_value(&tx).unwrap();
        let back: Transaction = validate_into(stored, payload_schema()).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn unknown_state_fails_rehydration() {
        let stored = json!({
            "user": "U1",
            "product": "P1",
            "amountOfProduct": 1,
            "date": "2024-01-01T00:00:00Z",
            "state": "refunded"
        });
        let err = validate_object(&stored, payload_schema()).unwrap_err();
        assert_eq!(err.message(), "state must be one of pending, active, canceled");
    }
}
