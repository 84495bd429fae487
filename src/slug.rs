/// Convert a human-supplied name into a URL-safe slug.
///
/// Lower-cases, drops everything that is not alphanumeric, underscore,
/// whitespace, or hyphen, then collapses runs of whitespace/underscore/hyphen
/// into a single hyphen and trims hyphens from both ends. Total and
/// idempotent; all-punctuation input yields an empty string and the caller
/// decides what that means.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;

    for c in text.to_lowercase().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_sep = true;
        } else if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c);
        }
        // anything else is dropped outright
    }

    out
}
