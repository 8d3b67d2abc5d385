//! Field registry, typed values, formatters and the dependency validator.
//!
//! These are the building blocks shared by the G69 and 10Q encoders.

mod error;
pub mod format;
mod registry;
mod rules;
mod value;

pub use error::*;
pub use format::AmountStyle;
pub use registry::*;
pub use rules::*;
pub use value::*;
