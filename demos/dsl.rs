use sift::parse::parse;
use sift::Fields;

fn main() {
    let source = r#"
# who may check out
user.age >= 18
    and user.status == "active"
    and not (user.banned == true, user.region in ["embargoed"])
"#;

    let expr = parse(source).expect("failed to parse matcher");
    println!("{expr}");
    let matcher = expr.into_matcher();

    // Encoded buffers walk dotted paths.
    let encoded = br#"{"user": {"age": 25, "status": "active", "banned": false, "region": "eu"}}"#;
    println!("encoded: {:?}", matcher.matches_encoded(encoded));

    // Records only see flat names, so the same tree reports the first missing field.
    let record = Fields::new().set("age", 25_i64);
    println!("record: {:?}", matcher.matches_record(&record));
}
