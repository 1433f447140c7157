/// Radius applied when the caller gives none or an unusable one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Reads a search radius in kilometres from a query-string value.
///
/// Leading whitespace is skipped and the longest decimal prefix is used, so
/// `"5km"` means 5. Absent, non-numeric, non-finite, zero and negative values
/// all fall back to [`DEFAULT_RADIUS_KM`].
#[must_use]
pub fn parse_radius_km(raw: Option<&str>) -> f64 {
    raw.and_then(|s| numeric_prefix(s.trim_start()).parse::<f64>().ok())
        .filter(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(DEFAULT_RADIUS_KM)
}

/// The leading `[+-]digits[.digits][(e|E)[+-]digits]` run of `s`, or `""`
/// when there is no mantissa digit.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &s[..end]
}
