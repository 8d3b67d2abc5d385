//! Session inputs for a 10Q transaction.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Values shared by every line of one 10Q transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenQConfig {
    /// Supplier ident (leverandørident), at most 4 characters.
    pub supplier_ident: String,
    /// Creation time stamped on every line.
    pub timestamp: NaiveDateTime,
    /// Tax year (påligningsår).
    pub tax_year: i32,
    /// Year the area number is taken from; normally the tax year.
    pub area_year: i32,
    /// Due date (forfaldsdato).
    pub due_date: NaiveDate,
    /// Date the claim was created (stiftelsesdato).
    pub creation_date: NaiveDate,
    /// First day of the period the claim covers.
    pub period_start: NaiveDate,
    /// Last day of the period the claim covers.
    pub period_end: NaiveDate,
    /// Fixed last payment date; `None` asks the session's date rule.
    #[serde(default)]
    pub last_payment_date: Option<NaiveDate>,
    /// Collection date (opkrævningsdato); defaults to the last payment date.
    #[serde(default)]
    pub collection_date: Option<NaiveDate>,
    /// Interest-free date (rentefri dato); defaults to the last payment date.
    #[serde(default)]
    pub interest_free_date: Option<NaiveDate>,
}

/// Builder for [`TenQConfig`].
///
/// Unset values default to: timestamp now (UTC), creation date the due
/// date, period the whole tax year, area year the tax year.
///
/// # Example
///
/// ```
/// use tenq::ten_q::TenQConfigBuilder;
/// use chrono::NaiveDate;
///
/// let config = TenQConfigBuilder::new("10Q", 2022, NaiveDate::from_ymd_opt(2022, 2, 18).unwrap())
///     .creation_date(NaiveDate::from_ymd_opt(2022, 2, 10).unwrap())
///     .build();
/// assert_eq!(config.period_start, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
/// ```
pub struct TenQConfigBuilder {
    supplier_ident: String,
    tax_year: i32,
    due_date: NaiveDate,
    timestamp: Option<NaiveDateTime>,
    area_year: Option<i32>,
    creation_date: Option<NaiveDate>,
    period_start: Option<NaiveDate>,
    period_end: Option<NaiveDate>,
    last_payment_date: Option<NaiveDate>,
    collection_date: Option<NaiveDate>,
    interest_free_date: Option<NaiveDate>,
}

impl TenQConfigBuilder {
    pub fn new(supplier_ident: impl Into<String>, tax_year: i32, due_date: NaiveDate) -> Self {
        Self {
            supplier_ident: supplier_ident.into(),
            tax_year,
            due_date,
            timestamp: None,
            area_year: None,
            creation_date: None,
            period_start: None,
            period_end: None,
            last_payment_date: None,
            collection_date: None,
            interest_free_date: None,
        }
    }

    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn area_year(mut self, year: i32) -> Self {
        self.area_year = Some(year);
        self
    }

    pub fn creation_date(mut self, date: NaiveDate) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Set the period the claim covers.
    pub fn period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.period_start = Some(start);
        self.period_end = Some(end);
        self
    }

    /// Bypass the date rule with a fixed last payment date.
    pub fn last_payment_date(mut self, date: NaiveDate) -> Self {
        self.last_payment_date = Some(date);
        self
    }

    pub fn collection_date(mut self, date: NaiveDate) -> Self {
        self.collection_date = Some(date);
        self
    }

    pub fn interest_free_date(mut self, date: NaiveDate) -> Self {
        self.interest_free_date = Some(date);
        self
    }

    pub fn build(self) -> TenQConfig {
        let year_start = NaiveDate::from_ymd_opt(self.tax_year, 1, 1);
        let year_end = NaiveDate::from_ymd_opt(self.tax_year, 12, 31);
        TenQConfig {
            supplier_ident: self.supplier_ident,
            timestamp: self
                .timestamp
                .unwrap_or_else(|| chrono::Utc::now().naive_utc()),
            tax_year: self.tax_year,
            area_year: self.area_year.unwrap_or(self.tax_year),
            due_date: self.due_date,
            creation_date: self.creation_date.unwrap_or(self.due_date),
            period_start: self.period_start.or(year_start).unwrap_or(self.due_date),
            period_end: self.period_end.or(year_end).unwrap_or(self.due_date),
            last_payment_date: self.last_payment_date,
            collection_date: self.collection_date,
            interest_free_date: self.interest_free_date,
        }
    }
}
