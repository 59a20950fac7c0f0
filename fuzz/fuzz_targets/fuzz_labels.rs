#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the label string tokenizer.
///
/// Accepted input must re-render to exactly the original string.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(labels) = data_validation::validators::get_labels(s) {
            let rendered: Vec<String> = labels.iter().map(ToString::to_string).collect();
            assert_eq!(rendered.join(","), s);
        }
    }
});
