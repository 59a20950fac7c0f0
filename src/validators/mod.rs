//! Scalar validators for user-supplied argument values.
//!
//! Each validator is a pure function from the raw command-line string to a
//! typed value, failing with its own error type:
//!
//! - [`threshold_float`]: non-negative, finite difference thresholds
//! - [`get_json_arg`] / [`decode_json_arg`]: strict JSON decoding
//! - [`get_labels`]: comma-separated `key=value` label strings

mod json;
mod labels;
mod threshold;

pub use json::{decode_json_arg, get_json_arg, JsonArgError};
pub use labels::{get_labels, Label, LabelError};
pub use threshold::{threshold_float, threshold_from_f64, ThresholdError};
