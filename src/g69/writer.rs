//! G69 record serialization.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::post_type::PostType;
use super::schema::G69Schema;
use crate::core::{format, AmountStyle, EncodeError, FieldSpec, FieldValue, TransactionValues};

const INTERFACE_TYPE: &str = "G69";
const LINE_FORMAT: &str = "FLYD";
const ORG_TYPE: u32 = 1;
const DELIMITER: &str = "&";
const DELIMITER_CHAR: char = '&';
const FIRST_LINE: u64 = 1;
/// Largest line number the five-digit header field holds.
const LAST_LINE: u64 = 99_999;

/// Serializes G69 general-ledger postings.
///
/// The writer numbers field lines across calls: every emitted field token
/// advances [`line_number`](Self::line_number) by one, the header does not.
/// Use a fresh writer, or call [`reset_line_number`](Self::reset_line_number),
/// for each output file.
#[derive(Debug, Clone)]
pub struct G69TransactionWriter {
    schema: Arc<G69Schema>,
    registration_site: u32,
    org_unit: u32,
    line_number: u64,
}

impl G69TransactionWriter {
    /// Writer over the standard G69 schema.
    pub fn new(registration_site: u32, org_unit: u32) -> Self {
        Self::with_schema(G69Schema::standard(), registration_site, org_unit)
    }

    pub fn with_schema(schema: Arc<G69Schema>, registration_site: u32, org_unit: u32) -> Self {
        Self {
            schema,
            registration_site,
            org_unit,
            line_number: FIRST_LINE,
        }
    }

    pub fn schema(&self) -> &G69Schema {
        &self.schema
    }

    /// Line number the next record header will carry.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    pub fn reset_line_number(&mut self) {
        log::trace!("G69 line number reset from {}", self.line_number);
        self.line_number = FIRST_LINE;
    }

    /// Serialize one posting as a single `&`-joined line.
    ///
    /// `post_type` is one of `NOR`, `PRI`, `SUP`, in any case. The whole
    /// value set is validated and formatted before the line counter moves,
    /// so a failed call leaves the writer untouched.
    pub fn serialize_transaction(
        &mut self,
        post_type: &str,
        values: &TransactionValues,
    ) -> Result<String, EncodeError> {
        let values = self.schema.rules.expand_aliases(values);
        let post_type: PostType = post_type.parse()?;

        let registry = &self.schema.registry;
        if let Some(unknown) = values.names().find(|n| !registry.contains(n)) {
            return Err(EncodeError::UnknownField {
                field: unknown.to_string(),
            });
        }

        let header = self.header(post_type)?;

        let present: BTreeSet<&str> = registry
            .iter()
            .map(|f| f.name)
            .filter(|name| values.contains(name))
            .collect();
        self.schema.rules.validate(registry, &present)?;

        let mut tokens = Vec::with_capacity(present.len() + 1);
        tokens.push(header);
        for spec in registry.iter() {
            if let Some(value) = values.get(spec.name) {
                tokens.push(Self::field_token(spec, value)?);
            }
        }

        let fields = (tokens.len() - 1) as u64;
        log::debug!(
            "G69 record at line {} with {} fields",
            self.line_number,
            fields
        );
        self.line_number += fields;

        Ok(tokens.join(DELIMITER))
    }

    /// Serialize a balanced debit/credit pair, debit first, joined by CRLF.
    ///
    /// Apart from the header line numbers the two records differ only in
    /// `deb_kred`. On failure the line counter is restored.
    pub fn serialize_transaction_pair(
        &mut self,
        post_type: &str,
        values: &TransactionValues,
    ) -> Result<String, EncodeError> {
        let start = self.line_number;
        let mut lines = Vec::with_capacity(2);
        for is_debet in [true, false] {
            let mut side = values.clone();
            side.remove("is_kredit");
            side.insert("is_debet", is_debet);
            match self.serialize_transaction(post_type, &side) {
                Ok(line) => lines.push(line),
                Err(e) => {
                    self.line_number = start;
                    return Err(e);
                }
            }
        }
        Ok(lines.join("\r\n"))
    }

    fn header(&self, post_type: PostType) -> Result<String, EncodeError> {
        if self.line_number > LAST_LINE {
            return Err(EncodeError::FieldTooWide {
                field: "line_number".to_string(),
                value: self.line_number.to_string(),
                width: 5,
            });
        }
        Ok(format!(
            "{:03}{INTERFACE_TYPE}{:05}{:04}{:02}{post_type}{LINE_FORMAT}",
            self.registration_site, self.line_number, self.org_unit, ORG_TYPE,
        ))
    }

    fn field_token(spec: &FieldSpec, value: &FieldValue) -> Result<String, EncodeError> {
        let rendered = spec.render(value, AmountStyle::TrailingSpace)?;
        if rendered.contains(DELIMITER) {
            return Err(EncodeError::IllegalCharacter {
                field: spec.name.to_string(),
                value: rendered,
                character: DELIMITER_CHAR,
            });
        }
        spec.check_width(&rendered)?;
        let rendered = if spec.zero_pad {
            format::zero_pad(&rendered, spec.width)
        } else {
            rendered
        };
        // G69Schema refuses untagged fields.
        let tag = spec.tag.unwrap_or_default();
        Ok(format!("{tag:03}{rendered}"))
    }
}
