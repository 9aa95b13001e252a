/// Render `value` with `,` thousands separators and an optional suffix.
pub fn format_count(value: i64, suffix: Option<&str>) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(s) = suffix {
        out.push_str(s);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/counter/format.rs"]
mod tests;
