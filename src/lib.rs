//! # tenq
//!
//! Encoders for the two fixed-width import formats of the Prisme accounting
//! backend: the multi-line positional **10Q** format used for debt-collection
//! notices, and the tagged single-line **G69** format used for general ledger
//! postings.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Callers supply a [`TransactionValues`] map from field name to
//! [`FieldValue`]; encoders validate it completely before producing output.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tenq::core::*;
//! use tenq::g69::G69TransactionWriter;
//! use rust_decimal_macros::dec;
//!
//! let mut writer = G69TransactionWriter::new(12, 34);
//! let values = TransactionValues::new()
//!     .with("maskinnr", 123)
//!     .with("eks_løbenr", 1)
//!     .with("post_dato", NaiveDate::from_ymd_opt(2022, 3, 11).unwrap())
//!     .with("kontonr", 1234005678)
//!     .with("beløb", dec!(123.45))
//!     .with("deb_kred", "D");
//!
//! let record = writer.serialize_transaction("NOR", &values).unwrap();
//! assert!(record.starts_with("012G6900001003401NORFLYD&103"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Field registry, values, formatters, dependency validator |
//! | `g69` (default) | G69 tagged general-ledger encoder |
//! | `ten_q` (default) | 10Q positional debt-collection encoder |
//! | `transfer` | Drop-folder transfer boundary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "g69")]
pub mod g69;

#[cfg(feature = "ten_q")]
pub mod ten_q;

#[cfg(feature = "transfer")]
pub mod transfer;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
