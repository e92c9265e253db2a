/// Canonicalizes a field name, id, placeholder, option label or profile value
/// into a comparable token: lower-cased, keeping only `[a-z0-9_]`.
///
/// Accepts `&str` or `Option<&str>`; `None` normalizes to the empty string.
pub fn normalize<'a>(s: impl Into<Option<&'a str>>) -> String {
    s.into()
        .unwrap_or("")
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_'))
        .collect()
}
