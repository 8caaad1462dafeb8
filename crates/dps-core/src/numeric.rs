use crate::{DpsError, DpsResult};

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute and relative tolerance for comparing simulated values.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> DpsResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DpsError::NonFinite { what, value: v })
    }
}

pub fn ensure_positive(v: Real, what: &'static str) -> DpsResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(DpsError::InvalidArg { what })
    }
}

/// Parse a raw text entry (as typed by an operator) into a finite `Real`.
///
/// Surrounding whitespace is ignored. Empty text, text that is not a number,
/// and `inf`/`nan` spellings are all rejected.
pub fn parse_real(text: &str, what: &'static str) -> DpsResult<Real> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DpsError::Empty { what });
    }
    let value: Real = trimmed.parse().map_err(|_| DpsError::NotANumber {
        what,
        text: trimmed.to_string(),
    })?;
    ensure_finite(value, what)
}
