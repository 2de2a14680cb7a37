//! Checked fixed-point arithmetic helpers.
//!
//! Both pool accounting and quorum math run on raw `u128` units. Rounding
//! direction is a correctness property here: pool conversions truncate
//! toward zero (the pool keeps the dust), participation thresholds round up
//! (a fractional quorum requirement is not met by the floor).

/// `floor(a * b / divisor)` with overflow checking.
///
/// Returns `None` on overflow or a zero divisor.
pub fn mul_div_floor(a: u128, b: u128, divisor: u128) -> Option<u128> {
    if divisor == 0 {
        return None;
    }
    a.checked_mul(b).map(|product| product / divisor)
}

/// `ceil(a / divisor)` with overflow checking.
///
/// Returns `None` on overflow or a zero divisor.
pub fn ceil_div(a: u128, divisor: u128) -> Option<u128> {
    if divisor == 0 {
        return None;
    }
    a.checked_add(divisor - 1).map(|n| n / divisor)
}
