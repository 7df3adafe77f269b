#![no_main]

use libfuzzer_sys::fuzz_target;
use tessera_layout::{validate_items, validate_layout};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    if let Ok(layout) = validate_layout(&value) {
        // Anything that validates must survive a serde round trip unchanged.
        assert!(validate_items(&layout).is_ok());
        let encoded = serde_json::to_value(&layout).expect("layout serializes");
        let reparsed = validate_layout(&encoded).expect("re-encoded layout validates");
        assert_eq!(reparsed, layout);
    }
});
