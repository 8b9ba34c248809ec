//! Dictionary-order string comparison
//!
//! Orders strings the way a human reads them rather than by raw bytes:
//! - Letters compare case-insensitively ("apple" < "Banana")
//! - Embedded digit runs compare by numeric value ("run2" < "run10")
//!
//! Ties that remain after that (case differences, leading zeros) are broken
//! by the first such difference, so the result is `Equal` only for
//! identical strings.

use std::cmp::Ordering;

/// Compare two strings in dictionary order
pub fn dict_cmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);
    let mut first_diff = Ordering::Equal;

    while i < a.len() && j < b.len() {
        let (c1, c2) = (a[i], b[j]);
        if c1.is_ascii_digit() && c2.is_ascii_digit() {
            let end1 = digit_run_end(a, i);
            let end2 = digit_run_end(b, j);
            let (run1, run2) = (&a[i..end1], &b[j..end2]);
            match cmp_digit_runs(run1, run2) {
                Ordering::Equal => {}
                ord => return ord,
            }
            if first_diff == Ordering::Equal {
                first_diff = run1.cmp(run2);
            }
            i = end1;
            j = end2;
        } else if c1 == c2 {
            i += 1;
            j += 1;
        } else {
            let (l1, l2) = (c1.to_ascii_lowercase(), c2.to_ascii_lowercase());
            if l1 != l2 {
                return l1.cmp(&l2);
            }
            // Same letter, different case: lowercase first.
            if first_diff == Ordering::Equal {
                first_diff = if c2.is_ascii_uppercase() {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
            }
            i += 1;
            j += 1;
        }
    }

    match (i < a.len(), j < b.len()) {
        (false, false) => first_diff,
        (false, true) => Ordering::Less,
        (true, _) => Ordering::Greater,
    }
}

/// Strict "less than" in dictionary order
pub fn dict_less(a: &str, b: &str) -> bool {
    dict_cmp(a, b) == Ordering::Less
}

fn digit_run_end(s: &[u8], start: usize) -> usize {
    s[start..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(s.len(), |n| start + n)
}

/// Compare two runs of ASCII digits by numeric value, of any length
fn cmp_digit_runs(a: &[u8], b: &[u8]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(s: &[u8]) -> &[u8] {
    let zeros = s.iter().take_while(|&&c| c == b'0').count();
    &s[zeros..]
}
