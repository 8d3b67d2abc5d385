#![cfg(feature = "g69")]

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tenq::core::*;
use tenq::g69::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn minimum_required() -> TransactionValues {
    TransactionValues::new()
        .with("kaldenavn", "test")
        .with("maskinnr", 123)
        .with("eks_løbenr", 1)
        .with("post_dato", date(2022, 3, 11))
        .with("kontonr", 1234005678)
        .with("beløb", dec!(123.45))
        .with("deb_kred", "D")
}

fn cvr_posting() -> TransactionValues {
    minimum_required()
        .with("kontonr", 123456789012345_i64)
        .with("is_cvr", true)
        .with("ydelse_modtager", 12345678)
}

fn field_value(record: &str, tag: u16) -> Option<String> {
    let prefix = format!("{tag:03}");
    record
        .split('&')
        .skip(1)
        .find(|t| t.starts_with(&prefix))
        .map(|t| t[3..].to_string())
}

// ---------------------------------------------------------------------------
// Full records
// ---------------------------------------------------------------------------

#[test]
fn writes_expected_record() {
    let mut writer = G69TransactionWriter::new(12, 34);
    let record = writer.serialize_transaction("NOR", &cvr_posting()).unwrap();
    insta::assert_snapshot!(
        record,
        @"012G6900001003401NORFLYD&101test&10300123&1040000001&11020220311&111123456789012345&112000000012345 &113D&13203&13312345678"
    );
}

#[test]
fn line_number_continues_across_records() {
    let mut writer = G69TransactionWriter::new(12, 34);
    writer.serialize_transaction("NOR", &cvr_posting()).unwrap();
    let second = writer
        .serialize_transaction("NOR", &cvr_posting().with("deb_kred", "K"))
        .unwrap();
    // nine field lines were emitted by the first record
    assert!(second.starts_with("012G6900010003401NORFLYD&"));
    assert_eq!(writer.line_number(), 19);
}

#[test]
fn fresh_writers_are_idempotent() {
    let a = G69TransactionWriter::new(12, 34)
        .serialize_transaction("NOR", &cvr_posting())
        .unwrap();
    let b = G69TransactionWriter::new(12, 34)
        .serialize_transaction("NOR", &cvr_posting())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn reset_restarts_numbering() {
    let mut writer = G69TransactionWriter::new(12, 34);
    let first = writer.serialize_transaction("NOR", &cvr_posting()).unwrap();
    writer.reset_line_number();
    let again = writer.serialize_transaction("NOR", &cvr_posting()).unwrap();
    assert_eq!(first, again);
}

#[test]
fn tokens_follow_registry_order() {
    let mut writer = G69TransactionWriter::new(0, 0);
    let values = minimum_required()
        .with("posteringstekst", "Husleje")
        .with("regnskabsår", 2024)
        .with("afstemningsenhed", "AB");
    let record = writer.serialize_transaction("SUP", &values).unwrap();
    let tags: Vec<&str> = record.split('&').skip(1).map(|t| &t[..3]).collect();
    assert_eq!(
        tags,
        ["101", "102", "103", "104", "110", "111", "112", "113", "114", "153"]
    );
    assert!(record.starts_with("000G6900001000001SUPFLYD&"));
}

// ---------------------------------------------------------------------------
// Post type
// ---------------------------------------------------------------------------

#[test]
fn post_type_is_case_insensitive() {
    let mut writer = G69TransactionWriter::new(0, 0);
    let record = writer.serialize_transaction("pri", &minimum_required()).unwrap();
    assert!(record.contains("PRIFLYD"));
}

#[test]
fn unknown_post_type_is_checked_first() {
    let mut writer = G69TransactionWriter::new(0, 0);
    let err = writer
        .serialize_transaction("XYZ", &TransactionValues::new())
        .unwrap_err();
    assert_eq!(
        err,
        EncodeError::UnknownPostType {
            value: "XYZ".into()
        }
    );
}

// ---------------------------------------------------------------------------
// Dependency rules
// ---------------------------------------------------------------------------

#[test]
fn missing_required_field() {
    let mut values = minimum_required();
    values.remove("beløb");
    let err = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap_err();
    assert_eq!(
        err,
        EncodeError::MissingRequiredField {
            field: "beløb".into()
        }
    );
}

#[test]
fn nrkode_without_recipient_is_missing_dependency() {
    let values = minimum_required().with("ydelse_modtager_nrkode", 3);
    let err = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap_err();
    assert_eq!(
        err,
        EncodeError::MissingDependency {
            field: "ydelse_modtager_nrkode".into(),
            missing: vec!["ydelse_modtager".into()],
        }
    );
}

#[test]
fn required_together_groups() {
    let groups = [
        TransactionValues::new()
            .with("ydelse_modtager_nrkode", 3)
            .with("ydelse_modtager", 3),
        TransactionValues::new()
            .with("rekvisitionsnr", 3)
            .with("delleverance", "N"),
        TransactionValues::new()
            .with("projekt_nr", "3")
            .with("projekt_art", "test")
            .with("antal", 10),
    ];
    let mut writer = G69TransactionWriter::new(0, 0);
    for group in &groups {
        for name in group.names() {
            let single = minimum_required().with(name, group.get(name).unwrap().clone());
            let err = writer.serialize_transaction("NOR", &single).unwrap_err();
            assert!(
                matches!(err, EncodeError::MissingDependency { .. }),
                "{name} alone should fail, got {err:?}"
            );
        }
        let full = group
            .names()
            .fold(minimum_required(), |acc, n| acc.with(n, group.get(n).unwrap().clone()));
        assert!(writer.serialize_transaction("NOR", &full).is_ok());
    }
}

#[test]
fn subject_conflicts_with_archive_number() {
    let subject = minimum_required()
        .with("emne", "test")
        .with("notat_long", "test");
    let mut writer = G69TransactionWriter::new(0, 0);
    assert!(writer.serialize_transaction("NOR", &subject).is_ok());

    let err = writer
        .serialize_transaction("NOR", &subject.clone().with("bilag_arkiv_nr", "test"))
        .unwrap_err();
    assert_eq!(
        err,
        EncodeError::ConflictingFields {
            field: "emne".into(),
            conflicting: vec!["bilag_arkiv_nr".into()],
        }
    );

    let err = writer
        .serialize_transaction("NOR", &subject.with("kontering_fakturapulje", "J"))
        .unwrap_err();
    assert!(matches!(err, EncodeError::ConflictingFields { .. }));
}

#[test]
fn required_together_is_checked_before_exclusion() {
    let values = minimum_required()
        .with("emne", "test")
        .with("bilag_arkiv_nr", "test");
    let err = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap_err();
    assert!(matches!(err, EncodeError::MissingDependency { .. }));
}

// ---------------------------------------------------------------------------
// Formatting and checks
// ---------------------------------------------------------------------------

#[test]
fn type_mismatch_is_rejected() {
    let mut writer = G69TransactionWriter::new(0, 0);
    let wrong: [FieldValue; 3] = [
        FieldValue::Integer(123),
        FieldValue::Date(date(2022, 3, 11)),
        FieldValue::Amount(dec!(100.25)),
    ];
    for value in wrong {
        let values = minimum_required().with("kaldenavn", value);
        let err = writer.serialize_transaction("NOR", &values).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::TypeMismatch {
                expected: FieldType::Text,
                ..
            }
        ));
    }
}

#[test]
fn integer_amount_is_promoted() {
    let values = minimum_required().with("beløb", 12);
    let record = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap();
    assert_eq!(field_value(&record, 112).unwrap(), "000000001200 ");
}

#[test]
fn negative_amount_has_trailing_minus() {
    let values = minimum_required().with("beløb", dec!(-12.34));
    let record = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap();
    assert_eq!(field_value(&record, 112).unwrap(), "000000001234-");
}

#[test]
fn unpadded_amount_field() {
    let values = minimum_required()
        .with("projekt_nr", "P1")
        .with("projekt_art", "drift")
        .with("antal", dec!(2.5));
    let record = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap();
    assert_eq!(field_value(&record, 304).unwrap(), "250 ");
}

#[test]
fn delimiter_in_value_is_illegal() {
    let values = minimum_required().with("kaldenavn", "A&B");
    let err = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap_err();
    assert_eq!(
        err,
        EncodeError::IllegalCharacter {
            field: "kaldenavn".into(),
            value: "A&B".into(),
            character: '&',
        }
    );
}

#[test]
fn too_wide_value_is_rejected() {
    let values = minimum_required().with("kaldenavn", "elleve tegn");
    let err = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap_err();
    assert_eq!(
        err,
        EncodeError::FieldTooWide {
            field: "kaldenavn".into(),
            value: "elleve tegn".into(),
            width: 10,
        }
    );
}

#[test]
fn width_counts_characters_not_bytes() {
    let values = minimum_required().with("kaldenavn", "æøåæøåæøåæ");
    assert!(
        G69TransactionWriter::new(0, 0)
            .serialize_transaction("NOR", &values)
            .is_ok()
    );
}

#[test]
fn account_number_pads_to_15() {
    let values = minimum_required().with("kontonr", 1_111_111_111_i64);
    let record = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap();
    assert_eq!(field_value(&record, 111).unwrap(), "000001111111111");
}

#[test]
fn account_number_may_exceed_15_digits() {
    let long: i128 = "1".repeat(30).parse().unwrap();
    let values = minimum_required().with("kontonr", long);
    let record = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap();
    assert_eq!(field_value(&record, 111).unwrap(), "1".repeat(30));
}

#[test]
fn unknown_field_is_rejected() {
    let values = minimum_required().with("kaldnavn", "typo");
    let err = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap_err();
    assert_eq!(
        err,
        EncodeError::UnknownField {
            field: "kaldnavn".into()
        }
    );
}

// ---------------------------------------------------------------------------
// Aliases
// ---------------------------------------------------------------------------

#[test]
fn is_cvr_false_maps_to_cpr_code() {
    let values = cvr_posting().with("is_cvr", false);
    let record = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap();
    assert_eq!(field_value(&record, 132).unwrap(), "02");
}

#[test]
fn invoice_pool_alias() {
    let values = minimum_required().with("is_kontering_fakturapulje", true);
    let record = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap();
    assert_eq!(field_value(&record, 200).unwrap(), "J");
}

#[test]
fn credit_alias_sets_side() {
    let mut values = minimum_required();
    values.remove("deb_kred");
    for (is_kredit, side) in [(true, "K"), (false, "D")] {
        let record = G69TransactionWriter::new(0, 0)
            .serialize_transaction("NOR", &values.clone().with("is_kredit", is_kredit))
            .unwrap();
        assert_eq!(field_value(&record, 113).unwrap(), side);
    }
}

#[test]
fn unmapped_alias_value_is_silently_ignored() {
    let values = minimum_required()
        .with("is_cvr", "ja")
        .with("ydelse_modtager_nrkode", 2)
        .with("ydelse_modtager", 12345678);
    let record = G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap();
    assert_eq!(field_value(&record, 132).unwrap(), "02");
}

#[test]
fn caller_values_are_not_mutated() {
    let values = cvr_posting();
    let before = values.clone();
    G69TransactionWriter::new(0, 0)
        .serialize_transaction("NOR", &values)
        .unwrap();
    assert_eq!(values, before);
}

// ---------------------------------------------------------------------------
// Debit/credit pair
// ---------------------------------------------------------------------------

#[test]
fn pair_is_debit_then_credit() {
    let mut values = cvr_posting();
    values.remove("deb_kred");
    let mut writer = G69TransactionWriter::new(12, 34);
    let pair = writer.serialize_transaction_pair("NOR", &values).unwrap();

    let lines: Vec<&str> = pair.split("\r\n").collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(field_value(lines[0], 113).unwrap(), "D");
    assert_eq!(field_value(lines[1], 113).unwrap(), "K");

    let debit: Vec<&str> = lines[0].split('&').skip(1).collect();
    let credit: Vec<&str> = lines[1].split('&').skip(1).collect();
    let differing: Vec<_> = debit
        .iter()
        .zip(&credit)
        .filter(|(d, c)| d != c)
        .map(|(d, _)| &d[..3])
        .collect();
    assert_eq!(differing, ["113"]);
    assert_eq!(writer.line_number(), 19);
}

#[test]
fn pair_overrides_supplied_side() {
    let values = cvr_posting().with("deb_kred", "K");
    let pair = G69TransactionWriter::new(0, 0)
        .serialize_transaction_pair("NOR", &values)
        .unwrap();
    let (debit, _) = pair.split_once("\r\n").unwrap();
    assert_eq!(field_value(debit, 113).unwrap(), "D");
}

#[test]
fn pair_ignores_credit_alias() {
    let values = cvr_posting().with("is_kredit", true);
    let pair = G69TransactionWriter::new(0, 0)
        .serialize_transaction_pair("NOR", &values)
        .unwrap();
    let (debit, credit) = pair.split_once("\r\n").unwrap();
    assert_eq!(field_value(debit, 113).unwrap(), "D");
    assert_eq!(field_value(credit, 113).unwrap(), "K");
}

#[test]
fn failed_pair_restores_counter() {
    let mut values = cvr_posting();
    values.remove("maskinnr");
    let mut writer = G69TransactionWriter::new(0, 0);
    assert!(writer.serialize_transaction_pair("NOR", &values).is_err());
    assert_eq!(writer.line_number(), 1);
}
