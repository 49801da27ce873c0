use std::cmp::Ordering;

/// Compare two dotted version strings segment by segment as numbers.
///
/// Missing trailing segments count as `0`, so `"1.2"` equals `"1.2.0"`.
/// Segments that are not made of ASCII digits also count as `0`; the
/// comparison never fails.
///
/// Examples:
/// - "1.2.3" vs "1.2.10" -> Less
/// - "1.2" vs "1.2.0" -> Equal
/// - "2.0" vs "1.9.9" -> Greater
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => {
                let ordering = compare_segment(l.unwrap_or("0"), r.unwrap_or("0"));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Returns true when `a` orders strictly before `b`
pub fn is_older(a: &str, b: &str) -> bool {
    compare_versions(a, b) == Ordering::Less
}

fn compare_segment(a: &str, b: &str) -> Ordering {
    let a = numeric_digits(a);
    let b = numeric_digits(b);

    // Digit strings without leading zeros order by length first, which keeps
    // segments larger than u64 comparable.
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Digits of a segment with leading zeros removed; "" stands for zero.
fn numeric_digits(segment: &str) -> &str {
    let segment = segment.trim();
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return "";
    }
    segment.trim_start_matches('0')
}
