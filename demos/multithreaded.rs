use std::sync::Arc;
use std::thread;

use futures::executor::block_on;
use ruleval::{ValidationRequest, Validator};

fn main() {
    let validator = Arc::new(Validator::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let v = Arc::clone(&validator);
            thread::spawn(move || {
                let age = 16_i64 + i64::from(i);
                let result = block_on(v.validate(
                    ValidationRequest::new(age, "required|between[18,65]").field("age"),
                ));
                (age, result.map_err(|f| f.message().to_owned()))
            })
        })
        .collect();

    for handle in handles {
        let (age, result) = handle.join().expect("thread panicked");
        match result {
            Ok(_) => println!("age {age}: ok"),
            Err(message) => println!("age {age}: {message}"),
        }
    }
}
