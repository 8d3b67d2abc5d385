use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::EncodeError;
use super::format::{self, AmountStyle};
use super::value::FieldValue;

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Integer,
    Date,
    Amount,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "string",
            Self::Integer => "integer",
            Self::Date => "date",
            Self::Amount => "decimal",
        })
    }
}

/// How a field treats a formatted value longer than its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WidthPolicy {
    /// Longer values are rejected with [`EncodeError::FieldTooWide`].
    #[default]
    Strict,
    /// Width is only a padding target: longer values pass through unpadded.
    PadOnly,
}

/// Description of one field in a record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name callers use in a [`TransactionValues`](super::TransactionValues).
    pub name: &'static str,
    /// External numeric code; only used by tagged layouts.
    pub tag: Option<u16>,
    /// Maximum rendered width in characters, and the padding target.
    pub width: usize,
    pub kind: FieldType,
    /// Must be present in every record.
    pub required: bool,
    /// Left-pad with `'0'` to `width`.
    pub zero_pad: bool,
    pub width_policy: WidthPolicy,
}

impl FieldSpec {
    const fn new(name: &'static str, width: usize, kind: FieldType) -> Self {
        Self {
            name,
            tag: None,
            width,
            kind,
            required: false,
            zero_pad: false,
            width_policy: WidthPolicy::Strict,
        }
    }

    /// Free-text field of at most `width` characters.
    pub const fn text(name: &'static str, width: usize) -> Self {
        Self::new(name, width, FieldType::Text)
    }

    /// Whole-number field rendered as plain digits.
    pub const fn integer(name: &'static str, width: usize) -> Self {
        Self::new(name, width, FieldType::Integer)
    }

    /// Date field, always 8 characters (`YYYYMMDD`).
    pub const fn date(name: &'static str) -> Self {
        Self::new(name, 8, FieldType::Date)
    }

    /// Decimal kroner amount, rendered in øre.
    pub const fn amount(name: &'static str, width: usize) -> Self {
        Self::new(name, width, FieldType::Amount)
    }

    /// Attach the numeric tag written in front of the value.
    pub const fn tag(mut self, tag: u16) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Mark the field mandatory.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Left-pad with zeros instead of spaces.
    pub const fn zero_pad(mut self) -> Self {
        self.zero_pad = true;
        self
    }

    /// Switch to [`WidthPolicy::PadOnly`].
    pub const fn pad_only(mut self) -> Self {
        self.width_policy = WidthPolicy::PadOnly;
        self
    }

    /// Type-check `value` and render it to its canonical text.
    ///
    /// An integer supplied for an amount field is promoted to a decimal.
    /// Width, padding and character checks are left to the caller.
    pub fn render(&self, value: &FieldValue, style: AmountStyle) -> Result<String, EncodeError> {
        match (self.kind, value) {
            (FieldType::Text, FieldValue::Text(s)) => Ok(s.clone()),
            (FieldType::Integer, FieldValue::Integer(n)) => Ok(format::format_integer(*n)),
            (FieldType::Date, FieldValue::Date(d)) => Ok(format::format_date(*d)),
            (FieldType::Amount, FieldValue::Amount(a)) => self.render_amount(*a, style),
            (FieldType::Amount, FieldValue::Integer(n)) => {
                let promoted = rust_decimal::Decimal::try_from_i128_with_scale(*n, 0)
                    .map_err(|_| self.too_wide(n.to_string()))?;
                self.render_amount(promoted, style)
            }
            _ => Err(EncodeError::TypeMismatch {
                field: self.name.to_string(),
                value: value.to_string(),
                expected: self.kind,
            }),
        }
    }

    fn render_amount(
        &self,
        amount: rust_decimal::Decimal,
        style: AmountStyle,
    ) -> Result<String, EncodeError> {
        let rendered = match style {
            AmountStyle::TrailingSpace => format::format_amount_kr(amount),
            AmountStyle::PaddedPlusMinus => format::format_amount_signed(amount, self.width),
        };
        rendered.ok_or_else(|| self.too_wide(amount.to_string()))
    }

    /// Fail if `formatted` exceeds the width under [`WidthPolicy::Strict`].
    pub fn check_width(&self, formatted: &str) -> Result<(), EncodeError> {
        if self.width_policy == WidthPolicy::Strict && formatted.chars().count() > self.width {
            return Err(self.too_wide(formatted.to_string()));
        }
        Ok(())
    }

    pub(crate) fn too_wide(&self, value: String) -> EncodeError {
        EncodeError::FieldTooWide {
            field: self.name.to_string(),
            value,
            width: self.width,
        }
    }
}

/// Ordered, immutable table of [`FieldSpec`]s.
///
/// Iteration order is output order. Names and tags are unique and every
/// width is positive; [`FieldRegistry::new`] enforces this.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldSpec>,
    by_name: HashMap<&'static str, usize>,
}

impl FieldRegistry {
    pub fn new(fields: impl IntoIterator<Item = FieldSpec>) -> Result<Self, EncodeError> {
        let fields: Vec<FieldSpec> = fields.into_iter().collect();
        let mut by_name = HashMap::with_capacity(fields.len());
        let mut tags = HashMap::new();
        for (idx, spec) in fields.iter().enumerate() {
            if spec.width == 0 {
                return Err(EncodeError::InvalidRegistry(format!(
                    "field {} has zero width",
                    spec.name
                )));
            }
            if by_name.insert(spec.name, idx).is_some() {
                return Err(EncodeError::InvalidRegistry(format!(
                    "duplicate field name {}",
                    spec.name
                )));
            }
            if let Some(tag) = spec.tag {
                if let Some(other) = tags.insert(tag, spec.name) {
                    return Err(EncodeError::InvalidRegistry(format!(
                        "tag {tag:03} used by both {other} and {}",
                        spec.name
                    )));
                }
            }
        }
        Ok(Self { fields, by_name })
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn by_tag(&self, tag: u16) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.tag == Some(tag))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    /// Required fields, in registry order.
    pub fn required(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
