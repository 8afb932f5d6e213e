/// Renders a balance the way the en-US locale does: grouped thousands and
/// exactly two fraction digits.
///
/// Rounding is half-up on the shortest decimal representation of `value`,
/// so `1234567.005` renders as `1,234,567.01`.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest
        .split_once('.')
        .unwrap_or((shortest.as_str(), ""));
    let (whole, cents) = round_half_up(int_part, frac_part);

    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}.{cents}", group_thousands(&whole))
}

fn round_half_up(int_part: &str, frac_part: &str) -> (String, String) {
    let mut digits: Vec<u8> = int_part.bytes().collect();
    let mut frac = frac_part.bytes();
    digits.push(frac.next().unwrap_or(b'0'));
    digits.push(frac.next().unwrap_or(b'0'));
    let round_up = frac.next().is_some_and(|d| d >= b'5');

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let cents = digits.split_off(digits.len() - 2);
    (
        String::from_utf8_lossy(&digits).into_owned(),
        String::from_utf8_lossy(&cents).into_owned(),
    )
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
