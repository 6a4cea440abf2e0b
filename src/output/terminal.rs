//! Terminal output utilities.

/// Format a value as a right-aligned field of at least `width` characters.
///
/// Values longer than `width` are returned unchanged.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    if value_str.len() >= width {
        value_str
    } else {
        format!("{value_str:>width$}")
    }
}

/// Group digits in threes, e.g. `16777216` -> `16,777,216`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
