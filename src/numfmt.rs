//! Abbreviated count formatting for the README stats bullets.
//!
//! Large counts (total lines of code, mostly) are rendered in the compact
//! `16,3k` style: thousands collapse to a one-decimal `k` suffix with a comma
//! as the decimal separator, and a redundant `,0` is dropped entirely
//! (`1000` → `1k`, not `1,0k`). Values below 1000 pass through unchanged.

/// Format a count as a human-readable abbreviated string.
///
/// - `0` → `"0"`, `999` → `"999"`
/// - `1000` → `"1k"`, `1250` → `"1,3k"`, `16300` → `"16,3k"`
///
/// Rounding is to one decimal place, half away from zero.
pub fn abbreviate(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    // Round n/1000 to one decimal using integer math: tenths of a thousand.
    let tenths = (n * 10 + 500) / 1000;
    let whole = tenths / 10;
    let frac = tenths % 10;
    if frac == 0 {
        format!("{whole}k")
    } else {
        format!("{whole},{frac}k")
    }
}
