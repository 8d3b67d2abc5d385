use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tenq::core::*;
use tenq::ten_q::*;

fn main() {
    // Claim raised today falls due four months on
    let raised = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let due = due_date_after(raised).expect("date in range");
    let config = TenQConfigBuilder::new("10Q", 2023, due)
        .creation_date(raised)
        .build();
    let session = TenQSession::new(&config, &LastPaymentDay);

    let debtors = [
        ("0101012222", dec!(1500.00), "44edf2b09e2d40fa8087cb37cfbdb66a", ""),
        ("0202023333", dec!(-120.50), "e688d6a6fc65424483819520bbbe7745", "5790000123456"),
    ];

    println!("=== 10Q debt collection file ===");
    let mut blocks = Vec::new();
    for (cpr, amount, key, ean) in debtors {
        let values = TransactionValues::new()
            .with("cpr_nummer", cpr)
            .with("rate_beloeb", amount)
            .with("afstem_noegle", key)
            .with("ean_lokationsnummer", ean);
        let block = session
            .serialize_transaction(&values, "Restskat 2023\nBetales senest 20. maj")
            .expect("debtor valid");
        blocks.push(block);
    }
    let file = blocks.join("\r\n");
    for (i, line) in file.split("\r\n").enumerate() {
        let head: String = line.chars().take(80).collect();
        println!("Line {}: {head}", i + 1);
    }
    println!("... ({} bytes total)", file.len());
}
