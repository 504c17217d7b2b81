//! Timing-style string comparison.

/// True iff `a` and `b` have the same byte length and every byte matches.
///
/// When the lengths match every position is visited, whatever the position of
/// the first difference. Unequal lengths return early, so the length itself
/// is not hidden.
pub fn fast_string_compare(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }

    let diff = a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y));
    std::hint::black_box(diff) == 0
}
