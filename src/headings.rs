//! Heading-title normalization and anchor slugs.
//!
//! Pages are often authored with their own numbering baked into the title
//! ("1.1 About your organisation"). The exporter assigns canonical numbers
//! itself, so any leading numeric-prefix token is stripped first:
//!
//! - `"1. Section"`    → `"Section"`
//! - `"1.1.Section"`   → `"Section"`
//! - `"1 Sect1on 1"`   → `"Sect1on 1"`
//! - `"Section 1.1"`   → `"Section 1.1"` (no leading prefix, unchanged)
//!
//! Only a *leading* token is removed; numeric groups embedded later in the
//! title are part of the name. If stripping would leave nothing, the title
//! passes through unchanged.

/// Strip a leading `<digits>(.<digits>)*.?` token and following whitespace.
pub fn strip_leading_numbers(title: &str) -> String {
    let bytes = title.as_bytes();
    let mut pos = 0;

    let digits = |from: usize| -> usize {
        let mut i = from;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i - from
    };

    // Leading digit run; no digits means no prefix at all.
    let first = digits(pos);
    if first == 0 {
        return title.to_string();
    }
    pos += first;

    // Any number of `.digits` groups.
    while pos < bytes.len() && bytes[pos] == b'.' {
        let group = digits(pos + 1);
        if group == 0 {
            break;
        }
        pos += 1 + group;
    }

    // Optional trailing dot, then whitespace.
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
    }
    let rest = title[pos..].trim_start();

    if rest.is_empty() {
        title.to_string()
    } else {
        rest.to_string()
    }
}

/// URL-safe anchor slug for a (normalized) heading title.
///
/// Lower-cases, keeps ASCII alphanumerics, and collapses every other run of
/// characters into a single dash: `"About your organisation"` →
/// `"about-your-organisation"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
