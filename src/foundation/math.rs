/// `round(x * y / 255)` for 8-bit channel products.
pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Inverse of premultiplication for a single channel, rounded and clamped to `u8`.
pub(crate) fn unmul_alpha_u8(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let a = u32::from(a);
    ((u32::from(c) * 255 + a / 2) / a).min(255) as u8
}

/// Entropy in bits of independently choosing one item from each pool.
pub(crate) fn entropy_bits(counts: impl IntoIterator<Item = usize>) -> f64 {
    counts
        .into_iter()
        .filter(|&n| n > 0)
        .map(|n| (n as f64).log2())
        .sum()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
