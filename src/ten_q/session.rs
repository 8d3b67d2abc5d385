//! 10Q transaction serialization.

use rust_decimal::Decimal;

use super::config::TenQConfig;
use super::dates::DateRule;
use super::layout::{self, LineKind, TEXT_WIDTH};
use crate::core::{format, AmountStyle, EncodeError, FieldValue, TransactionValues};

const LINE_BREAK: &str = "\r\n";

/// Header values for one 10Q transaction, frozen at construction.
///
/// Every line kind reads from the session; none of them changes it. Caller
/// values passed to the encode methods are layered on top of the session
/// values for that call only.
#[derive(Debug, Clone)]
pub struct TenQSession {
    header: TransactionValues,
}

impl TenQSession {
    /// Freeze the shared header values.
    ///
    /// The last payment date is derived from the due date by `rule`.
    pub fn new<R>(config: &TenQConfig, rule: &R) -> Self
    where
        R: DateRule + ?Sized,
    {
        let due = config.due_date;
        let last_payment = config
            .last_payment_date
            .unwrap_or_else(|| rule.last_payment_date(due));
        let header = TransactionValues::new()
            .with("leverandoer_ident", config.supplier_ident.as_str())
            .with("time_stamp", format::format_timestamp(config.timestamp))
            .with("bruger_nummer", "0900")
            .with("omraade_nummer", format::format_area_number(config.area_year))
            .with("betal_art", 209)
            .with("paalign_aar", config.tax_year)
            .with("sag_nummer", "00")
            .with("individ_type", "20")
            .with("rate_nummer", "999")
            .with("belob_type", "1")
            .with("rentefri_beloeb", Decimal::ZERO)
            .with("opkraev_kode", "1")
            .with("opkraev_dato", config.collection_date.unwrap_or(last_payment))
            .with("forfald_dato", due)
            .with("betal_dato", last_payment)
            .with("rentefri_dato", config.interest_free_date.unwrap_or(last_payment))
            .with("tekst_nummer", "000")
            .with("rate_spec", "")
            .with("slet_mark", "")
            .with("faktura_no", "")
            .with("stiftelse_dato", config.creation_date)
            .with("fra_periode", config.period_start)
            .with("til_periode", config.period_end)
            .with("aendrings_aarsag_kode", "")
            .with("aendrings_aarsag_tekst", "");
        Self { header }
    }

    /// The frozen header and default values.
    pub fn header_values(&self) -> &TransactionValues {
        &self.header
    }

    /// Debtor identity line (type 10).
    pub fn identity_line(&self, values: &TransactionValues) -> Result<String, EncodeError> {
        self.encode_line(LineKind::Identity, &self.working_values(values)?)
    }

    /// Rate and amount line (type 24).
    pub fn rate_line(&self, values: &TransactionValues) -> Result<String, EncodeError> {
        self.encode_line(LineKind::Rate, &self.working_values(values)?)
    }

    /// Location line (type 52) carrying `ean_lokationsnummer`.
    pub fn location_line(&self, values: &TransactionValues) -> Result<String, EncodeError> {
        self.encode_line(LineKind::Location, &self.working_values(values)?)
    }

    /// One text line (type 26) per line of `text`, numbered from 0.
    ///
    /// Each line carries at most 60 characters of text, unpadded.
    pub fn text_lines(
        &self,
        values: &TransactionValues,
        text: &str,
    ) -> Result<Vec<String>, EncodeError> {
        let working = self.working_values(values)?;
        self.encode_text_lines(&working, text)
    }

    /// Identity line, rate line and text lines joined by CRLF, followed by a
    /// location line when a non-empty `ean_lokationsnummer` is supplied.
    pub fn serialize_transaction(
        &self,
        values: &TransactionValues,
        text: &str,
    ) -> Result<String, EncodeError> {
        let working = self.working_values(values)?;
        let mut lines = vec![
            self.encode_line(LineKind::Identity, &working)?,
            self.encode_line(LineKind::Rate, &working)?,
        ];
        lines.extend(self.encode_text_lines(&working, text)?);
        if has_location(&working) {
            lines.push(self.encode_line(LineKind::Location, &working)?);
        }
        log::debug!("10Q transaction with {} lines", lines.len());
        Ok(lines.join(LINE_BREAK))
    }

    /// Session values overlaid with `values`, after rejecting unknown names.
    fn working_values(&self, values: &TransactionValues) -> Result<TransactionValues, EncodeError> {
        if let Some(unknown) = values.names().find(|n| !layout::is_known(n)) {
            return Err(EncodeError::UnknownField {
                field: unknown.to_string(),
            });
        }
        let mut working = self.header.merged_with(values);
        for name in layout::NUMBERS {
            if let Some(&FieldValue::Integer(n)) = working.get(name) {
                if n >= 0 {
                    working.insert(*name, format::format_integer(n));
                }
            }
        }
        if !working.contains("debitor_nummer") {
            if let Some(cpr) = working.get("cpr_nummer").cloned() {
                working.insert("debitor_nummer", cpr);
            }
        }
        Ok(working)
    }

    fn encode_text_lines(
        &self,
        working: &TransactionValues,
        text: &str,
    ) -> Result<Vec<String>, EncodeError> {
        let mut numbered = working.clone();
        let mut lines = Vec::new();
        for (idx, line) in split_text(text).into_iter().enumerate() {
            numbered.insert("line_number", idx as u64);
            let mut encoded = self.encode_line(LineKind::Text, &numbered)?;
            encoded.push_str(format::truncate_chars(line, TEXT_WIDTH));
            lines.push(encoded);
        }
        Ok(lines)
    }

    fn encode_line(
        &self,
        kind: LineKind,
        working: &TransactionValues,
    ) -> Result<String, EncodeError> {
        let trans_type = FieldValue::Text(kind.code().to_string());
        let mut line = String::with_capacity(kind.width());
        for spec in kind.registry().iter() {
            let value = if spec.name == "trans_type" {
                &trans_type
            } else {
                working.get(spec.name).ok_or_else(|| EncodeError::MissingValue {
                    field: spec.name.to_string(),
                })?
            };
            let rendered = spec.render(value, AmountStyle::PaddedPlusMinus)?;
            spec.check_width(&rendered)?;
            if spec.zero_pad {
                line.push_str(&format::zero_pad(&rendered, spec.width));
            } else {
                line.push_str(&format::right_justify(&rendered, spec.width));
            }
        }
        Ok(line)
    }
}

/// Split on `\r\n`, `\n` and a lone `\r`. A trailing break adds no line.
fn split_text(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(idx) => {
                lines.push(&rest[..idx]);
                let skip = if rest[idx..].starts_with(LINE_BREAK) { 2 } else { 1 };
                rest = &rest[idx + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

fn has_location(values: &TransactionValues) -> bool {
    match values.get("ean_lokationsnummer") {
        Some(FieldValue::Text(ean)) => !ean.is_empty(),
        Some(_) => true,
        None => false,
    }
}
