/// English ordinal suffix for `n`.
///
/// 11, 12 and 13 (mod 100) always take "th"; otherwise the last digit decides.
pub fn ordinal_suffix(n: u64) -> &'static str {
    if matches!(n % 100, 11..=13) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// `n` followed by its ordinal suffix, e.g. `21st`.
pub fn ordinal(n: u64) -> String {
    format!("{n}{}", ordinal_suffix(n))
}
