//! Slug derivation and validation.
//!
//! Slugs are the URL-safe handles on products and categories: ASCII
//! letters, digits, hyphens and underscores. [`slugify`] derives a
//! lowercased one from free text; [`is_valid`] checks a client-supplied one.

/// Whether `text` is a well-formed slug.
///
/// Empty strings are not valid slugs.
pub fn is_valid(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Derive a slug from free text.
///
/// Lowercases, drops characters that are neither alphanumeric, hyphen,
/// underscore nor whitespace, collapses whitespace and hyphen runs into a
/// single hyphen, and trims leading and trailing hyphens and underscores.
/// Returns an empty string when nothing survives.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch == '-' || ch.is_whitespace() {
            pending_hyphen = true;
        }
        // anything else is dropped without breaking the current run
    }

    while slug.ends_with(['-', '_']) {
        slug.pop();
    }
    while slug.starts_with(['-', '_']) {
        slug.remove(0);
    }
    slug
}

/// Derive a slug from `text` that is distinct from every slug `taken`
/// reports as in use, suffixing `-2`, `-3`, ... on collision.
pub fn uniquify<F>(text: &str, mut taken: F) -> String
where
    F: FnMut(&str) -> bool,
{
    let base = slugify(text);
    if !taken(&base) {
        return base;
    }
    let mut n = 2u64;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Wireless Mouse"), "wireless-mouse");
        assert_eq!(slugify("  Trail   Shoes "), "trail-shoes");
        assert_eq!(slugify("USB-C Hub"), "usb-c-hub");
    }

    #[test]
    fn test_slugify_drops_punctuation() {
        assert_eq!(slugify("Ben & Jerry's"), "ben-jerrys");
        assert_eq!(slugify("100% Cotton!"), "100-cotton");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_keeps_underscores() {
        assert_eq!(slugify("snake_case name"), "snake_case-name");
        assert_eq!(slugify("_edge_"), "edge");
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("wireless-mouse"));
        assert!(is_valid("usb_c_hub"));
        assert!(is_valid("a1"));
        assert!(!is_valid(""));
        assert!(!is_valid("has space"));
        assert!(!is_valid("Ümlaut"));
        assert!(!is_valid("semi;colon"));
    }

    #[test]
    fn test_uniquify_suffixes() {
        let existing = ["trail-shoes", "trail-shoes-2"];
        let slug = uniquify("Trail Shoes", |s| existing.contains(&s));
        assert_eq!(slug, "trail-shoes-3");

        let free = uniquify("Trail Shoes", |_| false);
        assert_eq!(free, "trail-shoes");
    }
}
