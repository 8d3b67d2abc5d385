#![no_main]

use libfuzzer_sys::fuzz_target;
use tenq::core::TransactionValues;
use tenq::g69::G69TransactionWriter;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let Some(date) = chrono::NaiveDate::from_ymd_opt(2024, 1, 2) else {
            return;
        };
        let (post_type, text) = s.split_at(s.char_indices().nth(3).map_or(s.len(), |(i, _)| i));
        let values = TransactionValues::new()
            .with("maskinnr", 1)
            .with("eks_løbenr", 1)
            .with("post_dato", date)
            .with("kontonr", 1)
            .with("beløb", 1)
            .with("deb_kred", "D")
            .with("posteringstekst", text);
        // Errors are fine, panics are bugs.
        let mut writer = G69TransactionWriter::new(1, 1);
        if let Ok(record) = writer.serialize_transaction(post_type, &values) {
            assert_eq!(record.matches('&').count(), values.len());
        }
    }
});
