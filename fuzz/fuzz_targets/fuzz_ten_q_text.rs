#![no_main]

use libfuzzer_sys::fuzz_target;
use tenq::core::TransactionValues;
use tenq::ten_q::{LastPaymentDay, TenQConfigBuilder, TenQSession};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let Some(due) = chrono::NaiveDate::from_ymd_opt(2024, 6, 1) else {
            return;
        };
        let config = TenQConfigBuilder::new("0230", 2024, due).build();
        let session = TenQSession::new(&config, &LastPaymentDay);
        let values = TransactionValues::new()
            .with("cpr_nummer", "0101012222")
            .with("rate_beloeb", 1)
            .with("afstem_noegle", text);
        // Errors are fine, panics are bugs.
        let _ = session.serialize_transaction(&values, text);
    }
});
