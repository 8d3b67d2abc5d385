use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::EncodeError;

/// G69 post type (posteringstype).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostType {
    /// Normal posting.
    Nor,
    /// Primo posting.
    Pri,
    /// Supplementary posting.
    Sup,
}

impl PostType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Nor => "NOR",
            Self::Pri => "PRI",
            Self::Sup => "SUP",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PostType {
    type Err = EncodeError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NOR" => Ok(Self::Nor),
            "PRI" => Ok(Self::Pri),
            "SUP" => Ok(Self::Sup),
            _ => Err(EncodeError::UnknownPostType {
                value: s.to_string(),
            }),
        }
    }
}
