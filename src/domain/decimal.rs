//! Fixed-point rendering of engine values.
//!
//! Prices leave the engine as fixed 2-decimal strings. Values that are read
//! back after rendering (smoothed prices feeding a projection) go through
//! [`round_cents`] so the arithmetic sees the same number the caller does.

use serde::Serializer;

/// Round to 2 decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render with a fixed number of decimals. Negative zero renders as zero.
pub fn fixed(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value);
    if rendered.starts_with('-') && rendered[1..].chars().all(|c| c == '0' || c == '.') {
        rendered[1..].to_string()
    } else {
        rendered
    }
}

pub fn fixed0<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&fixed(*value, 0))
}

pub fn fixed1<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&fixed(*value, 1))
}

pub fn fixed2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&fixed(*value, 2))
}

pub fn fixed4<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&fixed(*value, 4))
}
