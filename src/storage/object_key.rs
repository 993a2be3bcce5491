//! Object key derivation for direct browser uploads.
//!
//! Keys look like `uploads/<32 hex chars>_<sanitized filename>`. The random
//! component keeps two uploads of `cat.png` from overwriting each other.

use uuid::Uuid;

/// Prefix under which every uploaded object is stored.
pub const UPLOAD_PREFIX: &str = "uploads/";

/// Longest sanitized filename kept in a key.
pub const MAX_FILENAME_LEN: usize = 120;

/// Base name used when the client filename has nothing usable in it.
pub const FALLBACK_FILENAME: &str = "upload";

/// Derives a fresh object key for `filename`.
#[must_use]
pub fn generate_object_key(filename: &str) -> String {
    format!(
        "{UPLOAD_PREFIX}{}_{}",
        Uuid::new_v4().simple(),
        sanitize_filename(filename)
    )
}

/// Reduces a client-supplied filename to a safe key component.
///
/// Directory components are dropped, each run of characters outside
/// `[A-Za-z0-9._-]` becomes a single `_`, and the result is capped at
/// [`MAX_FILENAME_LEN`] characters. A name with no allowed characters
/// (or only `.`/`..`) becomes [`FALLBACK_FILENAME`].
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .split(['/', '\\'])
        .rev()
        .find(|part| !part.is_empty())
        .unwrap_or_default();

    // A trailing `.` or `..` component is a traversal, not a name; it falls
    // back instead of surviving as the base name.
    if base == "." || base == ".." || !base.chars().any(is_allowed) {
        return FALLBACK_FILENAME.to_string();
    }

    let mut out = String::with_capacity(base.len());
    let mut in_run = false;
    for c in base.chars() {
        if is_allowed(c) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out.chars().take(MAX_FILENAME_LEN).collect()
}

const fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn strips_directory_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\fakepath\\cat.png"), "cat.png");
        assert_eq!(sanitize_filename("photos/"), "photos");
    }

    #[test]
    fn replaces_disallowed_runs_with_single_underscore() {
        assert_eq!(sanitize_filename("my cat (1).png"), "my_cat_1_.png");
        assert_eq!(sanitize_filename("貓咪.jpg"), "_.jpg");
        assert_eq!(sanitize_filename("a-b_c.d"), "a-b_c.d");
    }

    #[test]
    fn falls_back_when_nothing_usable() {
        assert_eq!(sanitize_filename(""), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("///"), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("@#$%"), FALLBACK_FILENAME);
    }

    #[test]
    fn trailing_dot_components_fall_back() {
        assert_eq!(sanitize_filename("dir/.."), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("photos/./"), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename(".."), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("..."), "...");
    }

    #[test]
    fn truncates_long_names() {
        let long = "a".repeat(300);
        assert_eq!(sanitize_filename(&long).len(), MAX_FILENAME_LEN);
    }

    #[test]
    fn generated_key_has_prefix_random_hex_and_name() {
        let key = generate_object_key("../cat.png");
        let Some(rest) = key.strip_prefix(UPLOAD_PREFIX) else {
            panic!("missing prefix: {key}");
        };
        let Some((random, name)) = rest.split_once('_') else {
            panic!("missing separator: {key}");
        };
        assert_eq!(random.len(), 32);
        assert!(random.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(name, "cat.png");
    }

    #[test]
    fn generated_keys_are_unique() {
        assert_ne!(generate_object_key("a.png"), generate_object_key("a.png"));
    }
}
