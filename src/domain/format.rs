//! Display helpers for the Brazilian storefront: BRL amounts, durations and
//! local phone numbers.

/// `12345` cents -> `R$ 123,45`; thousands are separated with dots.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}R$ {grouped},{fraction:02}")
}

pub fn format_duration(minutes: i32) -> String {
    if minutes <= 0 {
        return "0 min".to_string();
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

/// Formats 10- and 11-digit numbers as `(99) 9999-9999` / `(99) 99999-9999`;
/// anything else is returned untouched.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => phone.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency() {
        assert_eq!(format_currency(0), "R$ 0,00");
        assert_eq!(format_currency(3500), "R$ 35,00");
        assert_eq!(format_currency(123456), "R$ 1.234,56");
        assert_eq!(format_currency(100000005), "R$ 1.000.000,05");
        assert_eq!(format_currency(-250), "-R$ 2,50");
    }

    #[test]
    fn duration() {
        assert_eq!(format_duration(0), "0 min");
        assert_eq!(format_duration(45), "45 min");
        assert_eq!(format_duration(60), "1 h");
        assert_eq!(format_duration(95), "1 h 35 min");
    }

    #[test]
    fn phone() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("1134567890"), "(11) 3456-7890");
        assert_eq!(format_phone("+1 555"), "+1 555");
    }
}
