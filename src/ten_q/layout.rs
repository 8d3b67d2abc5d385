//! Positional field tables for the 10Q line kinds.

use std::sync::LazyLock;

use crate::core::{FieldRegistry, FieldSpec};

/// Leading fields shared by every line kind.
const PREFIX: &[FieldSpec] = &[
    FieldSpec::text("leverandoer_ident", 4),
    FieldSpec::text("trans_type", 2),
    FieldSpec::text("time_stamp", 13),
    FieldSpec::text("bruger_nummer", 4),
    FieldSpec::text("omraade_nummer", 3),
    FieldSpec::integer("betal_art", 3),
    FieldSpec::integer("paalign_aar", 4),
    FieldSpec::text("debitor_nummer", 10).zero_pad(),
    FieldSpec::text("sag_nummer", 2).zero_pad(),
];

const IDENTITY: &[FieldSpec] = &[FieldSpec::text("cpr_nummer", 10).zero_pad()];

const RATE: &[FieldSpec] = &[
    FieldSpec::text("individ_type", 2),
    FieldSpec::text("rate_nummer", 3),
    FieldSpec::amount("rate_beloeb", 11),
    FieldSpec::text("belob_type", 1),
    FieldSpec::amount("rentefri_beloeb", 11),
    FieldSpec::text("opkraev_kode", 1),
    FieldSpec::date("opkraev_dato"),
    FieldSpec::date("forfald_dato"),
    FieldSpec::date("betal_dato"),
    FieldSpec::date("rentefri_dato"),
    FieldSpec::text("tekst_nummer", 3),
    FieldSpec::text("rate_spec", 3),
    FieldSpec::text("slet_mark", 1),
    FieldSpec::text("faktura_no", 35),
    FieldSpec::date("stiftelse_dato"),
    FieldSpec::date("fra_periode"),
    FieldSpec::date("til_periode"),
    FieldSpec::text("aendrings_aarsag_kode", 4),
    FieldSpec::text("aendrings_aarsag_tekst", 100),
    FieldSpec::text("afstem_noegle", 35),
];

const TEXT: &[FieldSpec] = &[
    FieldSpec::text("individ_type", 2),
    FieldSpec::text("rate_nummer", 3),
    FieldSpec::integer("line_number", 3).zero_pad(),
];

const LOCATION: &[FieldSpec] = &[FieldSpec::text("ean_lokationsnummer", 13)];

/// Number fields that also accept an integer, rendered as its digits.
pub(crate) const NUMBERS: &[&str] = &["cpr_nummer", "debitor_nummer", "sag_nummer"];

/// Names the encoder fills in itself.
pub(crate) const RESERVED: &[&str] = &["trans_type", "line_number"];

/// Maximum characters of free text carried by one text line.
pub const TEXT_WIDTH: usize = 60;

/// The kinds of line making up one 10Q transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Debtor identity (type 10).
    Identity,
    /// Rate and amount (type 24).
    Rate,
    /// Free text (type 26).
    Text,
    /// EAN location number of a public-sector debtor (type 52).
    Location,
}

impl LineKind {
    pub const ALL: [LineKind; 4] = [Self::Identity, Self::Rate, Self::Text, Self::Location];

    /// Two-digit transaction type code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Identity => "10",
            Self::Rate => "24",
            Self::Text => "26",
            Self::Location => "52",
        }
    }

    /// Positional fields of this line kind, in output order.
    pub fn registry(&self) -> &'static FieldRegistry {
        static IDENTITY_LINE: LazyLock<FieldRegistry> = LazyLock::new(|| build(IDENTITY));
        static RATE_LINE: LazyLock<FieldRegistry> = LazyLock::new(|| build(RATE));
        static TEXT_LINE: LazyLock<FieldRegistry> = LazyLock::new(|| build(TEXT));
        static LOCATION_LINE: LazyLock<FieldRegistry> = LazyLock::new(|| build(LOCATION));
        match self {
            Self::Identity => LazyLock::force(&IDENTITY_LINE),
            Self::Rate => LazyLock::force(&RATE_LINE),
            Self::Text => LazyLock::force(&TEXT_LINE),
            Self::Location => LazyLock::force(&LOCATION_LINE),
        }
    }

    /// Width of the positional part of the line.
    pub fn width(&self) -> usize {
        self.registry().iter().map(|f| f.width).sum()
    }
}

fn build(body: &[FieldSpec]) -> FieldRegistry {
    FieldRegistry::new(PREFIX.iter().chain(body).copied())
        .expect("built-in 10Q tables are consistent")
}

/// True if `name` is a field of any line kind that callers may supply.
pub(crate) fn is_known(name: &str) -> bool {
    !RESERVED.contains(&name) && LineKind::ALL.iter().any(|k| k.registry().contains(name))
}
