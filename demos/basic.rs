use sift::{and, field, not, Fields};

fn main() {
    let matcher = and([
        field("age").gte(18_i64),
        field("status").eq("active"),
        not([field("region").is_in(["embargoed", "unknown"])]),
    ]);

    println!("{matcher:?}");

    let record = Fields::new()
        .set("age", 25_i64)
        .set("status", "active")
        .set("region", "eu");

    match matcher.matches_record(&record) {
        Ok(result) => println!("record: {result}"),
        Err(e) => println!("record: {e}"),
    }

    let encoded = br#"{"age": 16, "status": "active", "region": "eu"}"#;
    match matcher.matches_encoded(encoded) {
        Ok(result) => println!("encoded: {result}"),
        Err(e) => println!("encoded: {e}"),
    }
}
