//! Property-based tests for the encoders.
//!
//! Run with: `cargo test --features all --test proptest_tests`

#![cfg(all(feature = "g69", feature = "ten_q"))]

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tenq::core::*;
use tenq::g69::G69TransactionWriter;
use tenq::ten_q::*;

fn base() -> TransactionValues {
    TransactionValues::new()
        .with("maskinnr", 123)
        .with("eks_løbenr", 1)
        .with("post_dato", NaiveDate::from_ymd_opt(2022, 3, 11).unwrap())
        .with("kontonr", 1234005678)
        .with("beløb", Decimal::new(12345, 2))
        .with("deb_kred", "D")
}

/// Optional G69 fields without companions, with their tags.
const FREE_FIELDS: &[(&str, u16)] = &[
    ("kaldenavn", 101),
    ("afstemningsenhed", 102),
    ("posteringstekst", 153),
    ("bærer", 180),
    ("afdeling", 181),
    ("formål", 182),
    ("konteret_af", 201),
    ("ekstern_reference", 250),
];

fn arb_free_fields() -> impl Strategy<Value = Vec<(&'static str, u16, String)>> {
    proptest::sample::subsequence(FREE_FIELDS.to_vec(), 0..=FREE_FIELDS.len()).prop_flat_map(
        |picked| {
            let n = picked.len();
            proptest::collection::vec("[A-Za-z0-9 æøå]{1,5}", n).prop_map(move |texts| {
                picked
                    .iter()
                    .zip(texts)
                    .map(|(&(name, tag), text)| (name, tag, text))
                    .collect()
            })
        },
    )
}

fn ten_q_session() -> TenQSession {
    let due = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let config = TenQConfigBuilder::new("0230", 2024, due)
        .timestamp(NaiveDate::from_ymd_opt(2024, 5, 14).unwrap().and_hms_opt(9, 30, 0).unwrap())
        .creation_date(NaiveDate::from_ymd_opt(2024, 5, 14).unwrap())
        .build();
    TenQSession::new(&config, &LastPaymentDay)
}

// ── Property Tests ──────────────────────────────────────────────────────────

proptest! {
    /// Two fresh writers produce the same record for the same input.
    #[test]
    fn g69_encoding_is_deterministic(fields in arb_free_fields()) {
        let mut values = base();
        for (name, _, text) in &fields {
            values.insert(*name, text.as_str());
        }
        let a = G69TransactionWriter::new(1, 2).serialize_transaction("NOR", &values).unwrap();
        let b = G69TransactionWriter::new(1, 2).serialize_transaction("NOR", &values).unwrap();
        prop_assert_eq!(a, b);
    }

    /// One token per present field, tags ascending after the header.
    #[test]
    fn g69_token_shape(fields in arb_free_fields()) {
        let mut values = base();
        for (name, _, text) in &fields {
            values.insert(*name, text.as_str());
        }
        let mut writer = G69TransactionWriter::new(1, 2);
        let record = writer.serialize_transaction("SUP", &values).unwrap();
        let tokens: Vec<&str> = record.split('&').collect();
        prop_assert_eq!(tokens.len(), 1 + values.len());
        prop_assert_eq!(writer.line_number(), 1 + values.len() as u64);

        let tags: Vec<u16> = tokens[1..]
            .iter()
            .map(|t| t[..3].parse().unwrap())
            .collect();
        prop_assert!(tags.windows(2).all(|w| w[0] < w[1]));
        for (_, tag, text) in &fields {
            let expected = format!("{tag:03}{text}");
            prop_assert!(tokens.contains(&expected.as_str()));
        }
    }

    /// Amounts are whole øre, zero padded, with a trailing sign character.
    #[test]
    fn g69_amount_sign(ore in -99_999_999_999i64..=99_999_999_999i64) {
        let values = base().with("beløb", Decimal::new(ore, 2));
        let record = G69TransactionWriter::new(1, 2)
            .serialize_transaction("NOR", &values)
            .unwrap();
        let sign = if ore < 0 { '-' } else { ' ' };
        let expected = format!("&112{:012}{sign}&", ore.unsigned_abs());
        prop_assert!(record.contains(&expected));
    }

    /// The delimiter can never appear inside a value.
    #[test]
    fn g69_delimiter_always_rejected(head in "[a-z]{0,4}", tail in "[a-z]{0,4}") {
        let text = format!("{head}&{tail}");
        let values = base().with("kaldenavn", text.as_str());
        let err = G69TransactionWriter::new(1, 2)
            .serialize_transaction("NOR", &values)
            .unwrap_err();
        prop_assert!(
            matches!(err, EncodeError::IllegalCharacter { character: '&', .. }),
            "unexpected error: {err:?}"
        );
    }

    /// 10Q identity and rate lines always have their fixed widths.
    #[test]
    fn ten_q_lines_have_fixed_width(
        key in "[a-zæøå0-9 ]{1,35}",
        ore in -9_999_999_999i64..=9_999_999_999i64,
    ) {
        let values = TransactionValues::new()
            .with("cpr_nummer", "0101012222")
            .with("afstem_noegle", key.as_str())
            .with("rate_beloeb", Decimal::new(ore, 2));
        let session = ten_q_session();
        let identity = session.identity_line(&values).unwrap();
        let rate = session.rate_line(&values).unwrap();
        prop_assert_eq!(identity.chars().count(), LineKind::Identity.width());
        prop_assert_eq!(rate.chars().count(), LineKind::Rate.width());
    }

    /// Every text line carries at most 60 characters after the sequence number.
    #[test]
    fn ten_q_text_is_bounded(text in "[a-zø\n]{0,300}") {
        let values = TransactionValues::new()
            .with("cpr_nummer", "0101012222")
            .with("rate_beloeb", Decimal::ONE);
        let lines = ten_q_session().text_lines(&values, &text).unwrap();
        prop_assert_eq!(lines.len(), text.lines().count());
        for line in lines {
            prop_assert!(line.chars().count() <= LineKind::Text.width() + TEXT_WIDTH);
        }
    }
}
