// 足以完整展開任何 f64 的小數位
const EXACT_FRACTION_DIGITS: usize = 1074;

// 超過此值改用指數表示
const FIXED_NOTATION_LIMIT: f64 = 1e21;

/// Fixed-decimal rendering that follows JavaScript `Number.prototype.toFixed`.
///
/// The exact binary value is rounded, so `1.45` (stored just below the tie)
/// gives `"1.4"`, while exact ties go away from zero (`0.25` -> `"0.3"`).
/// `-0.0` renders without a sign; any other negative value keeps it, even
/// when the rounded magnitude is zero (`-0.01` -> `"-0.0"`). Magnitudes of
/// `1e21` and above, including infinity, use shortest exponent notation
/// (`8e307` -> `"8e+307"`).
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    if magnitude >= FIXED_NOTATION_LIMIT {
        return format!("{}{}", sign, exponent_notation(magnitude));
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS.max(digits + 1), magnitude);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<char> = int_part
        .chars()
        .chain(frac_part.chars().take(digits))
        .collect();

    // 展開是精確的，所以第一個捨去位 >= 5 就代表餘數 >= 0.5
    let round_up = frac_part
        .chars()
        .nth(digits)
        .is_some_and(|d| d >= '5');
    if round_up {
        increment_digits(&mut kept);
    }

    let int_len = kept.len() - digits;
    let mut out = String::with_capacity(sign.len() + kept.len() + 1);
    out.push_str(sign);
    out.extend(&kept[..int_len]);
    if digits > 0 {
        out.push('.');
        out.extend(&kept[int_len..]);
    }
    out
}

fn increment_digits(digits: &mut Vec<char>) {
    for d in digits.iter_mut().rev() {
        if *d == '9' {
            *d = '0';
        } else {
            *d = char::from(*d as u8 + 1);
            return;
        }
    }
    digits.insert(0, '1');
}

fn exponent_notation(magnitude: f64) -> String {
    if magnitude.is_infinite() {
        return "Infinity".to_string();
    }
    let shortest = format!("{:e}", magnitude);
    match shortest.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => shortest,
    }
}

/// Appends a unit suffix the way the report prints it (`"0.5"` + `"V"` -> `"0.5 V"`).
pub fn with_unit(value: &str, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{} {}", value, unit)
    }
}
