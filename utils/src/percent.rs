//! Percentage helpers.

use crate::Error;

/// Returns `part` as a percentage of `total`.
pub fn percent_of(part: f64, total: f64) -> Result<f64, Error> {
    if !part.is_finite() || !total.is_finite() {
        return Err(Error::NonFinite);
    }
    if total == 0.0 {
        return Err(Error::ZeroTotal);
    }
    Ok(part / total * 100.0)
}

/// Scales `values` so that they sum to 100.
///
/// Every value must be finite and non-negative, and at least one must be non-zero. An empty
/// slice yields an empty vector.
pub fn normalize(values: &[f64]) -> Result<Vec<f64>, Error> {
    if values.is_empty() {
        return Ok(Vec::new());
    }
    let mut total = 0.0;
    for value in values {
        if !value.is_finite() {
            return Err(Error::NonFinite);
        }
        if *value < 0.0 {
            return Err(Error::Negative);
        }
        total += value;
    }
    if !total.is_finite() {
        return Err(Error::NonFinite);
    }
    if total == 0.0 {
        return Err(Error::ZeroTotal);
    }
    Ok(values.iter().map(|value| value / total * 100.0).collect())
}
