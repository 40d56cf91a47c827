use std::sync::Arc;
use std::thread;

use sift::{and, field, Matcher};

fn main() {
    let matcher: Arc<Box<dyn Matcher>> = Arc::new(and([
        field("age").gte(18_i64),
        field("status").eq("active"),
    ]));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let m = Arc::clone(&matcher);
            thread::spawn(move || {
                let age = 16 + i;
                let encoded = format!(r#"{{"age": {age}, "status": "active"}}"#);
                let result = m.matches_encoded(encoded.as_bytes());
                println!("Thread {i}: {result:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
