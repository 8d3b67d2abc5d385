use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tenq::core::*;
use tenq::g69::*;

fn main() {
    let posting = TransactionValues::new()
        .with("kaldenavn", "boligstøtt")
        .with("maskinnr", 123)
        .with("eks_løbenr", 1)
        .with("post_dato", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        .with("kontonr", 1234005678)
        .with("beløb", dec!(-2500.00))
        .with("is_cvr", false)
        .with("ydelse_modtager", 101012222)
        .with("posteringstekst", "Boligstøtte marts");

    let mut writer = G69TransactionWriter::new(12, 34);

    // Balanced debit and credit lines for one posting
    let pair = writer
        .serialize_transaction_pair("NOR", &posting)
        .expect("posting valid");
    println!("=== G69 posting pair ===");
    for line in pair.split("\r\n") {
        println!("{line}");
    }
    println!("next line number: {}\n", writer.line_number());

    // Validation errors name the offending field
    let broken = posting.with("ydelse_modtager", "not a number");
    match writer.serialize_transaction("NOR", &broken.with("deb_kred", "D")) {
        Ok(_) => println!("unexpectedly valid"),
        Err(e) => println!("rejected: {e} (field: {:?})", e.field()),
    }
}
