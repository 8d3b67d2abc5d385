//! 10Q debt-collection notices.
//!
//! One transaction is a block of fixed-width lines joined by CRLF: a debtor
//! identity line, a rate/amount line, one line per line of free text and,
//! for debtors with an EAN location number, a location line. Shared header
//! values live in a [`TenQSession`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use tenq::core::TransactionValues;
//! use tenq::ten_q::{LastPaymentDay, TenQConfigBuilder, TenQSession};
//!
//! let due = NaiveDate::from_ymd_opt(2022, 2, 18).unwrap();
//! let config = TenQConfigBuilder::new("10Q", 2022, due).build();
//! let session = TenQSession::new(&config, &LastPaymentDay);
//!
//! let values = TransactionValues::new()
//!     .with("cpr_nummer", "1234567890")
//!     .with("rate_beloeb", dec!(1000.00))
//!     .with("afstem_noegle", "e688d6a6fc65424483819520bbbe7745");
//!
//! let block = session.serialize_transaction(&values, "Restskat 2022").unwrap();
//! assert_eq!(block.split("\r\n").count(), 3);
//! ```

mod config;
mod dates;
mod layout;
mod session;

pub use config::{TenQConfig, TenQConfigBuilder};
pub use dates::{DateRule, LastPaymentDay, due_date_after, last_payment_date_after};
pub use layout::{LineKind, TEXT_WIDTH};
pub use session::TenQSession;
