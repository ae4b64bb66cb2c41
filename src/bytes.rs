use atoi::FromRadix10SignedChecked;
use memchr::memchr_iter;

/// A line is blank if it holds nothing but spaces and line terminators
///
/// A tab always separates fields, so a line carrying one is a (possibly
/// empty) row, never a blank.
#[inline]
pub fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| matches!(b, b' ' | b'\r' | b'\n'))
}

/// Split the first `N` tab-separated fields off a line.
///
/// Anything after the `N`th field is ignored. On a short line the number of
/// fields actually found is returned as the error.
#[inline]
pub fn leading_fields<const N: usize>(line: &str) -> Result<[&str; N], usize> {
    let mut fields = [""; N];
    let mut found = 0;
    let mut start = 0;

    for end in memchr_iter(b'\t', line.as_bytes()) {
        if found == N {
            break;
        }
        fields[found] = &line[start..end];
        found += 1;
        start = end + 1;
    }
    if found < N {
        fields[found] = &line[start..];
        found += 1;
    }

    if found < N { Err(found) } else { Ok(fields) }
}

/// Parse a whole field as a signed decimal integer.
///
/// Surrounding whitespace is allowed; trailing garbage is not.
#[inline]
pub fn parse_int(field: &str) -> Option<i64> {
    let bytes = field.trim().as_bytes();
    // a bare sign consumes input without yielding a digit
    if !bytes.iter().any(u8::is_ascii_digit) {
        return None;
    }
    match i64::from_radix_10_signed_checked(bytes) {
        (Some(n), used) if used == bytes.len() => Some(n),
        _ => None,
    }
}
