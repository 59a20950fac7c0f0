#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the threshold validator; accepted values are always finite and non-negative.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(value) = data_validation::validators::threshold_float(s) {
            assert!(value.is_finite() && value >= 0.0);
        }
    }
});
