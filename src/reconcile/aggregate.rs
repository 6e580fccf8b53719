//! Cross-provider statistical aggregation

/// Arithmetic mean over the value components of `(provider, value)` pairs.
///
/// Provider names ride along for traceability only and never weight the
/// mean. Inputs must already share one temperature scale (Fahrenheit);
/// unit conversion is an adapter responsibility. Requires a non-empty
/// slice, which the day aligner guarantees for any axis key.
#[must_use]
pub fn mean_of(values: &[(String, f64)]) -> f64 {
    let sum: f64 = values.iter().map(|(_, value)| value).sum();
    sum / values.len() as f64
}
