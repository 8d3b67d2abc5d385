use thiserror::Error;

use super::registry::FieldType;

/// Errors raised while validating or encoding a record.
///
/// Every variant names the offending field. No encoder returns partial
/// output once one of these has been raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// The G69 post type is not one of `NOR`, `PRI` or `SUP`.
    #[error("post_type must be NOR, PRI or SUP, got '{value}'")]
    UnknownPostType {
        /// The rejected post type, as supplied.
        value: String,
    },

    /// A field marked as required in the registry was not supplied.
    #[error("field {field} is required")]
    MissingRequiredField {
        /// Name of the missing field.
        field: String,
    },

    /// A field was supplied without all of its required companions.
    #[error("when supplying {field}, you must also supply {}", quoted(.missing))]
    MissingDependency {
        /// The field whose presence triggered the rule.
        field: String,
        /// Companion fields that were absent.
        missing: Vec<String>,
    },

    /// A field was supplied together with fields it excludes.
    #[error("when supplying {field}, you may not also supply {}", quoted(.conflicting))]
    ConflictingFields {
        /// The field whose presence triggered the rule.
        field: String,
        /// Excluded fields that were present.
        conflicting: Vec<String>,
    },

    /// The supplied value does not have the field's declared type.
    #[error("{field}={value} must be of type {expected}")]
    TypeMismatch {
        /// Field name.
        field: String,
        /// Debug rendering of the supplied value.
        value: String,
        /// Declared type of the field.
        expected: FieldType,
    },

    /// The formatted value is longer than the field allows.
    #[error("value {field}={value} may not exceed length {width}")]
    FieldTooWide {
        /// Field name.
        field: String,
        /// The formatted value.
        value: String,
        /// Maximum width of the field.
        width: usize,
    },

    /// The formatted value contains the record delimiter.
    #[error("value {field}={value} may not contain '{character}'")]
    IllegalCharacter {
        /// Field name.
        field: String,
        /// The formatted value.
        value: String,
        /// The forbidden character.
        character: char,
    },

    /// A positional field has neither a caller value nor a default.
    #[error("no value for {field}")]
    MissingValue {
        /// Field name.
        field: String,
    },

    /// The caller supplied a name that is neither a field nor an alias.
    #[error("unknown field {field}")]
    UnknownField {
        /// The unrecognised name.
        field: String,
    },

    /// A field registry or rule table violates its construction invariants.
    #[error("invalid registry: {0}")]
    InvalidRegistry(String),
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

impl EncodeError {
    /// Name of the field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { field }
            | Self::MissingDependency { field, .. }
            | Self::ConflictingFields { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::FieldTooWide { field, .. }
            | Self::IllegalCharacter { field, .. }
            | Self::MissingValue { field }
            | Self::UnknownField { field } => Some(field),
            Self::UnknownPostType { .. } => Some("post_type"),
            Self::InvalidRegistry(_) => None,
        }
    }
}
