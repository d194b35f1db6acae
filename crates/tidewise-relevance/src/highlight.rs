use regex::RegexBuilder;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// Wraps every case-insensitive occurrence of `needle` in `<mark>` tags,
/// keeping the original casing of `text`.
pub fn highlight(text: &str, needle: &str) -> String {
    let needle = needle.trim();
    if needle.is_empty() {
        return text.to_string();
    }

    let pattern = regex::escape(needle);
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re
            .replace_all(text, |caps: &regex::Captures<'_>| {
                format!("{MARK_OPEN}{}{MARK_CLOSE}", &caps[0])
            })
            .into_owned(),
        Err(_) => text.to_string(),
    }
}
