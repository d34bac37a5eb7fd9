use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// Image placeholders left behind by upstream PDF conversion:
// `![alt](None)` and `![alt]()`.
static IMAGE_NONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*!\[[^\]]*\]\(\s*None\s*\)[ \t]*\r?\n?").unwrap());
static IMAGE_EMPTY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*!\[[^\]]*\]\(\s*\)[ \t]*\r?\n?").unwrap());
static EXCESS_BLANKS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip conversion artifacts before parsing: dead image placeholders and
/// runs of three or more blank lines. Table and heading lines are left
/// untouched.
pub fn clean_markdown(input: &str) -> String {
    let text = IMAGE_NONE_RE.replace_all(input, "");
    let text = IMAGE_EMPTY_RE.replace_all(&text, "");
    EXCESS_BLANKS_RE.replace_all(&text, "\n\n").into_owned()
}

/// Normalize narrative text for comparison and export: NFKC, collapsed
/// internal whitespace, trimmed.
pub fn normalize_text(input: &str) -> String {
    let normalized: String = input.nfkc().collect();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}
