//! The G69 field table, dependency rules and aliases.

use std::sync::{Arc, LazyLock};

use crate::core::{Alias, DependencyRule, EncodeError, FieldRegistry, FieldSpec, RuleSet};

/// Field table in output order.
///
/// `kontonr` (111) zero-pads to 15 digits but lets longer account numbers
/// through unpadded. `ydelse_modtager` (133) is emitted unpadded so 8-digit
/// CVR numbers keep their width.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("kaldenavn", 10).tag(101),
    FieldSpec::text("afstemningsenhed", 5).tag(102),
    FieldSpec::integer("maskinnr", 5).tag(103).required().zero_pad(),
    FieldSpec::integer("eks_løbenr", 7).tag(104).required().zero_pad(),
    FieldSpec::date("post_dato").tag(110).required().zero_pad(),
    FieldSpec::integer("kontonr", 15).tag(111).required().zero_pad().pad_only(),
    FieldSpec::amount("beløb", 13).tag(112).required().zero_pad(),
    FieldSpec::text("deb_kred", 1).tag(113).required(),
    FieldSpec::integer("regnskabsår", 4).tag(114).zero_pad(),
    FieldSpec::text("bilag_arkiv_nr", 255).tag(116),
    FieldSpec::integer("udbet_henv_nr", 20).tag(117),
    FieldSpec::date("valør_dato").tag(118),
    FieldSpec::integer("betaling_modtager_nrkode", 2).tag(130).zero_pad(),
    FieldSpec::integer("betaling_modtager", 10).tag(131).zero_pad(),
    FieldSpec::integer("ydelse_modtager_nrkode", 2).tag(132).zero_pad(),
    FieldSpec::integer("ydelse_modtager", 10).tag(133),
    FieldSpec::integer("oplysningspligtig_nrkode", 2).tag(134).zero_pad(),
    FieldSpec::integer("oplysningspligtig", 10).tag(135).zero_pad(),
    FieldSpec::text("oplysningspligt_kode", 1).tag(136),
    FieldSpec::text("postering_udtrækstekst_1", 5).tag(150),
    FieldSpec::text("postering_udtrækstekst_2", 5).tag(151),
    FieldSpec::text("postering_udtrækskode", 5).tag(152),
    FieldSpec::text("posteringstekst", 35).tag(153),
    FieldSpec::integer("rekvisitionsnr", 10).tag(170).zero_pad(),
    FieldSpec::text("delleverance", 1).tag(171),
    FieldSpec::text("bærer", 10).tag(180),
    FieldSpec::text("afdeling", 10).tag(181),
    FieldSpec::text("formål", 10).tag(182),
    FieldSpec::integer("omvendt_betalingspligt", 2).tag(185).zero_pad(),
    FieldSpec::text("kontering_fakturapulje", 1).tag(200),
    FieldSpec::text("konteret_af", 5).tag(201),
    FieldSpec::text("notat_short", 200).tag(202),
    FieldSpec::text("attesteret_af", 5).tag(203),
    FieldSpec::text("emne", 60).tag(210),
    FieldSpec::text("notat_long", 1024).tag(211),
    FieldSpec::text("ekstern_reference", 20).tag(250),
    FieldSpec::text("iris_nr", 20).tag(251),
    FieldSpec::text("projekt_nr", 20).tag(300),
    FieldSpec::text("projekt_art", 10).tag(301),
    FieldSpec::text("prisme_medarbejder", 10).tag(302),
    FieldSpec::amount("salgspris", 13).tag(303),
    FieldSpec::amount("antal", 10).tag(304),
    FieldSpec::text("linje_egenskab", 10).tag(305),
    FieldSpec::text("aktivitet_nr", 10).tag(306),
];

fn dependency_rules() -> Vec<DependencyRule> {
    vec![
        DependencyRule::requires("ydelse_modtager_nrkode", &["ydelse_modtager"]),
        DependencyRule::requires("ydelse_modtager", &["ydelse_modtager_nrkode"]),
        DependencyRule::requires("rekvisitionsnr", &["delleverance"]),
        DependencyRule::requires("delleverance", &["rekvisitionsnr"]),
        DependencyRule::requires("emne", &["notat_long"]),
        DependencyRule::requires("notat_long", &["emne"]),
        DependencyRule::requires("projekt_nr", &["projekt_art", "antal"]),
        DependencyRule::requires("projekt_art", &["projekt_nr", "antal"]),
        DependencyRule::requires("prisme_medarbejder", &["projekt_nr", "projekt_art", "antal"]),
        DependencyRule::requires("salgspris", &["projekt_nr", "projekt_art", "antal"]),
        DependencyRule::requires("antal", &["projekt_nr", "projekt_art"]),
        DependencyRule::requires("linje_egenskab", &["projekt_nr", "projekt_art", "antal"]),
        DependencyRule::requires("aktivitet_nr", &["projekt_nr", "projekt_art", "antal"]),
        DependencyRule::excludes("emne", &["bilag_arkiv_nr", "kontering_fakturapulje"]),
        DependencyRule::excludes("notat_long", &["bilag_arkiv_nr", "kontering_fakturapulje"]),
    ]
}

fn aliases() -> Vec<Alias> {
    vec![
        // CVR-number recipient (3) rather than CPR-number recipient (2)
        Alias::flag("is_cvr", "ydelse_modtager_nrkode", 2, 3),
        Alias::flag("is_kontering_fakturapulje", "kontering_fakturapulje", "N", "J"),
        Alias::flag("is_debet", "deb_kred", "K", "D"),
        Alias::flag("is_kredit", "deb_kred", "D", "K"),
    ]
}

/// Field registry and rule tables for the G69 layout.
#[derive(Debug, Clone)]
pub struct G69Schema {
    pub registry: FieldRegistry,
    pub rules: RuleSet,
}

impl G69Schema {
    /// Every field of a tagged layout must carry a tag.
    pub fn new(registry: FieldRegistry, rules: RuleSet) -> Result<Self, EncodeError> {
        if let Some(spec) = registry.iter().find(|f| f.tag.is_none()) {
            return Err(EncodeError::InvalidRegistry(format!(
                "G69 field {} has no tag",
                spec.name
            )));
        }
        Ok(Self { registry, rules })
    }

    fn build_standard() -> Result<Self, EncodeError> {
        let registry = FieldRegistry::new(FIELDS.iter().copied())?;
        let rules = RuleSet::new(&registry, dependency_rules(), aliases())?;
        Self::new(registry, rules)
    }

    /// The shared standard schema, built on first use.
    pub fn standard() -> Arc<G69Schema> {
        static STANDARD: LazyLock<Arc<G69Schema>> = LazyLock::new(|| {
            Arc::new(G69Schema::build_standard().expect("built-in G69 tables are consistent"))
        });
        Arc::clone(&STANDARD)
    }
}
