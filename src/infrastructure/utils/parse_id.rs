/// Parses a path id the lenient way clients expect: surrounding whitespace is
/// ignored and any trailing non-digit suffix is dropped (`"12abc"` → `12`).
/// Returns `None` when no leading integer can be read.
pub fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
