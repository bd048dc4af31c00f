//! Lenient ordering for release tags.
//!
//! Tags are split into components: runs of ASCII digits are numeric, `.` only
//! separates, and any other run of characters is text. Components compare
//! pairwise (numbers by value, text lexicographically, a number below text).
//! If one tag runs out first with all compared components equal, it is lower.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component<'a> {
    Numeric(&'a str),
    Text(&'a str),
}

fn components(tag: &str) -> Vec<Component<'_>> {
    let mut out = Vec::new();
    let bytes = tag.as_bytes();
    let mut start = 0;

    while start < bytes.len() {
        if bytes[start] == b'.' {
            start += 1;
            continue;
        }

        let numeric = bytes[start].is_ascii_digit();
        let mut end = start + 1;
        while end < bytes.len()
            && bytes[end] != b'.'
            && bytes[end].is_ascii_digit() == numeric
        {
            end += 1;
        }

        // split points are ASCII, so slicing stays on char boundaries
        let part = &tag[start..end];
        out.push(if numeric {
            Component::Numeric(part)
        } else {
            Component::Text(part)
        });
        start = end;
    }

    out
}

/// Compares digit strings by value without parsing, so tags like date stamps
/// longer than `u64` still order correctly.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_component(a: &Component, b: &Component) -> Ordering {
    match (a, b) {
        (Component::Numeric(a), Component::Numeric(b)) => compare_numeric(a, b),
        (Component::Text(a), Component::Text(b)) => a.cmp(b),
        (Component::Numeric(_), Component::Text(_)) => Ordering::Less,
        (Component::Text(_), Component::Numeric(_)) => Ordering::Greater,
    }
}

pub fn compare_loose(a: &str, b: &str) -> Ordering {
    let a = components(a);
    let b = components(b);

    for (x, y) in a.iter().zip(b.iter()) {
        let ord = compare_component(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    a.len().cmp(&b.len())
}
