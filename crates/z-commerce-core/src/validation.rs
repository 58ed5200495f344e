//! Declarative record validation.
//!
//! A [`Schema`] maps field names to [`RuleChain`]s. A rule chain is an ordered
//! list of predicates, each paired with the message reported when it fails.
//! [`validate_object`] walks the schema in declaration order and stops at the
//! first failing rule, so a caller always sees exactly one message: the one for
//! the first invalid field.
//!
//! Chains are values. Every builder method consumes the chain and returns a new
//! one, and a finished chain is shared read-only behind an `Arc`:
//!
//! ```
//! use z_commerce_core::validation::{validate_object, RuleChain, Schema};
//!
//! let schema = Schema::new()
//!     .field("price", RuleChain::new()
//!         .required("price must be present")
//!         .is_number("price must be a number")
//!         .is_greater_than_zero("price must be greater than zero"));
//!
//! let record = serde_json::json!({ "price": -5 });
//! let err = validate_object(&record, &schema).unwrap_err();
//! assert_eq!(err.message(), "price must be greater than zero");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Message reported when the validated record is not a JSON object.
pub const NOT_AN_OBJECT: &str = "record must be a JSON object";

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A validation failure carrying the message of the first rule that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: Cow<'static, str>,
}

impl ValidationError {
    /// Create a validation error with the given message.
    #[must_use]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single predicate over a field value and its failure message.
#[derive(Clone)]
pub struct Rule {
    check: Predicate,
    message: Cow<'static, str>,
}

impl Rule {
    /// Create a rule from a predicate and the message reported when it fails.
    pub fn new<F>(check: F, message: impl Into<Cow<'static, str>>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
            message: message.into(),
        }
    }

    /// Evaluate the rule. An absent field is evaluated as `null`.
    #[must_use]
    pub fn passes(&self, value: &Value) -> bool {
        (self.check)(value)
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("message", &self.message).finish()
    }
}

/// An ordered, immutable sequence of rules for one field.
#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    rules: Arc<[Rule]>,
}

impl RuleChain {
    /// An empty chain. Every value passes it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new chain with `rule` appended.
    #[must_use]
    pub fn rule(self, rule: Rule) -> Self {
        let mut rules = self.rules.to_vec();
        rules.push(rule);
        Self {
            rules: rules.into(),
        }
    }

    /// Append an arbitrary predicate.
    #[must_use]
    pub fn custom<F>(self, check: F, message: impl Into<Cow<'static, str>>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.rule(Rule::new(check, message))
    }

    /// The field must be present, non-null and, for strings, not blank.
    #[must_use]
    pub fn required(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom(
            |value| match value {
                Value::Null => false,
                Value::String(s) => !s.trim().is_empty(),
                _ => true,
            },
            message,
        )
    }

    /// The field must be a string of at most `max` characters.
    #[must_use]
    pub fn max_length(self, max: usize, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom(
            move |value| value.as_str().is_some_and(|s| s.chars().count() <= max),
            message,
        )
    }

    /// The field must be a string of at least `min` characters.
    #[must_use]
    pub fn min_length(self, min: usize, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom(
            move |value| value.as_str().is_some_and(|s| s.chars().count() >= min),
            message,
        )
    }

    /// The field must be a JSON number.
    #[must_use]
    pub fn is_number(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom(Value::is_number, message)
    }

    /// The field must be an integral JSON number (`3`, not `3.0`).
    #[must_use]
    pub fn is_integer(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom(|value| value.is_i64() || value.is_u64(), message)
    }

    /// The field must be a JSON string.
    #[must_use]
    pub fn is_string(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom(Value::is_string, message)
    }

    /// The field must be a number strictly greater than zero.
    #[must_use]
    pub fn is_greater_than_zero(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom(|value| value.as_f64().is_some_and(|n| n > 0.0), message)
    }

    /// The field must be a string containing at least one ASCII digit.
    #[must_use]
    pub fn has_digits(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom(
            |value| value.as_str().is_some_and(|s| s.chars().any(|c| c.is_ascii_digit())),
            message,
        )
    }

    /// The field must be a string containing at least one uppercase letter.
    #[must_use]
    pub fn has_uppercase(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom(
            |value| value.as_str().is_some_and(|s| s.chars().any(char::is_uppercase)),
            message,
        )
    }

    /// The field must be a string containing at least one lowercase letter.
    #[must_use]
    pub fn has_lowercase(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom(
            |value| value.as_str().is_some_and(|s| s.chars().any(char::is_lowercase)),
            message,
        )
    }

    /// The field must be a string whose every word starts with an uppercase letter.
    #[must_use]
    pub fn title_case(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom(|value| value.as_str().is_some_and(is_title_case), message)
    }

    /// Run the chain against a value and report the first failing rule.
    ///
    /// # Errors
    ///
    /// Returns the message of the first rule whose predicate fails.
    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match self.rules.iter().find(|rule| !rule.passes(value)) {
            Some(rule) => Err(ValidationError::new(rule.message.clone())),
            None => Ok(()),
        }
    }

    /// Number of rules in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the chain has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn is_title_case(s: &str) -> bool {
    let mut words = s.split_whitespace().peekable();
    words.peek().is_some()
        && words.all(|word| word.chars().next().is_some_and(char::is_uppercase))
}

/// Field name to rule chain, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(Cow<'static, str>, RuleChain)>,
}

impl Schema {
    /// An empty schema. Every object passes it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new schema with `name` validated by `chain`.
    ///
    /// Declaring the same field twice appends a second, independent entry; both
    /// are checked in declaration order.
    #[must_use]
    pub fn field(mut self, name: impl Into<Cow<'static, str>>, chain: RuleChain) -> Self {
        self.fields.push((name.into(), chain));
        self
    }

    /// Declared field names, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_ref())
    }
}

/// Validate `record` against `schema`, fail-fast.
///
/// Fields are checked in declaration order and each field's rules in chain
/// order; the first failure wins. Fields not declared in the schema are
/// ignored. A missing field is checked as `null`.
///
/// # Errors
///
/// Returns the first failing rule's message, or [`NOT_AN_OBJECT`] when
/// `record` is not a JSON object.
pub fn validate_object(record: &Value, schema: &Schema) -> Result<(), ValidationError> {
    let Some(object) = record.as_object() else {
        return Err(ValidationError::new(NOT_AN_OBJECT));
    };

    for (name, chain) in &schema.fields {
        let value = object.get(name.as_ref()).unwrap_or(&Value::Null);
        chain.check(value)?;
    }

    Ok(())
}

/// Validate `record` against `schema`, then deserialize it into `T`.
///
/// Deserialization only runs once the schema has passed, so its error surfaces
/// only for shapes the schema does not describe (for example an integer that
/// overflows the target type).
///
/// # Errors
///
/// Returns the first schema failure, or a `malformed record` message when the
/// validated record still cannot be deserialized.
pub fn validate_into<T: DeserializeOwned>(
    record: Value,
    schema: &Schema,
) -> Result<T, ValidationError> {
    validate_object(&record, schema)?;
    serde_json::from_value(record).map_err(|e| ValidationError::new(format!("malformed record: {e}")))
}
