use std::sync::Arc;
use std::thread;

use sift::{and, field, not, or, Fields, Matcher};

#[test]
fn evaluate_across_threads() {
    let matcher: Arc<Box<dyn Matcher>> = Arc::new(and([
        field("age").gte(18),
        or([field("status").eq("active"), field("status").eq("trial")]),
        not([field("banned").eq(true)]),
    ]));

    let cases = [
        (25, "active", false, true),
        (30, "trial", false, true),
        (30, "active", true, false),
        (15, "active", false, false),
        (40, "inactive", false, false),
    ];

    let handles: Vec<_> = cases
        .into_iter()
        .map(|(age, status, banned, expected)| {
            let m = Arc::clone(&matcher);
            thread::spawn(move || {
                let record = Fields::new()
                    .set("age", age)
                    .set("status", status)
                    .set("banned", banned);
                let encoded = format!(
                    r#"{{"age": {age}, "status": "{status}", "banned": {banned}}}"#
                );
                (
                    m.matches_record(&record),
                    m.matches_encoded(encoded.as_bytes()),
                    expected,
                )
            })
        })
        .collect();

    for handle in handles {
        let (from_record, from_encoded, expected) = handle.join().unwrap();
        assert_eq!(from_record, Ok(expected));
        assert_eq!(from_encoded, Ok(expected));
    }
}
