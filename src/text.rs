//! Whitespace normalization for extracted text.

/// Collapse every run of whitespace into a single space and trim both ends.
///
/// `None` and empty input both yield an empty string.
///
/// ```
/// use samhita::text::normalize;
///
/// assert_eq!(normalize(Some("  agním īḷe\n\tpuróhitaṃ ")), "agním īḷe puróhitaṃ");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Normalize each fragment, drop the empty ones, and join the rest with a space.
pub fn join_normalized<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let parts: Vec<String> = fragments
        .into_iter()
        .map(|s| normalize(Some(s)))
        .filter(|s| !s.is_empty())
        .collect();
    normalize(Some(&parts.join(" ")))
}
