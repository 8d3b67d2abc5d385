//! G69 general-ledger postings.
//!
//! One posting is one line of `&`-joined tokens: a fixed header followed by
//! `TAG+VALUE` tokens for the fields the caller supplied, in table order.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use tenq::core::TransactionValues;
//! use tenq::g69::G69TransactionWriter;
//!
//! let mut writer = G69TransactionWriter::new(12, 34);
//! let values = TransactionValues::new()
//!     .with("maskinnr", 123)
//!     .with("eks_løbenr", 1)
//!     .with("post_dato", NaiveDate::from_ymd_opt(2022, 3, 11).unwrap())
//!     .with("kontonr", 123456789012345_i64)
//!     .with("beløb", dec!(-12.34));
//!
//! let pair = writer.serialize_transaction_pair("nor", &values).unwrap();
//! let (debit, credit) = pair.split_once("\r\n").unwrap();
//! assert!(debit.contains("&112000000001234-&113D"));
//! assert!(credit.contains("&113K"));
//! ```

mod post_type;
mod schema;
mod writer;

pub use post_type::PostType;
pub use schema::{FIELDS, G69Schema};
pub use writer::G69TransactionWriter;
