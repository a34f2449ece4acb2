/// Multiplier of the polynomial rolling hash
const HASH_MULTIPLIER: i32 = 31;

/// Hash a string into a stable non-negative integer
///
/// Classic `hash = hash * 31 + unit` over UTF-16 code units, wrapped to a
/// signed 32-bit integer after every step. The absolute value is returned
/// unsigned so `i32::MIN` maps to `2^31` instead of overflowing.
///
/// Browsers, the JVM and this service all agree on the output for the same
/// input, which keeps quiz results identical wherever they are computed.
#[inline]
pub fn string_hash(input: &str) -> u32 {
    input
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

/// Map a hash onto `[0.0, 0.99]` in steps of `0.01`
#[inline]
pub fn hash_fraction(hash: u32) -> f64 {
    f64::from(hash % 100) / 100.0
}
