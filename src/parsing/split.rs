use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the record delimiter, e.g. `<|RELATED_DOC_SEP-4f2a|>`. The
/// suffix after `SEP-` varies per file and is not interpreted.
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\|RELATED_DOC_SEP-[^|>]*\|>").unwrap());

/// One record segment plus the separator token that introduced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSegment<'a> {
    /// Separator token preceding this segment, None for the first.
    pub separator: Option<&'a str>,
    pub text: &'a str,
}

/// Split a file on the record delimiter. The token is a hard record
/// boundary: each returned segment is a self-contained report document.
/// Segments that are blank after trimming are dropped.
pub fn split_records(input: &str) -> Vec<RecordSegment<'_>> {
    let mut segments = Vec::new();
    let mut last_end = 0;
    let mut pending_sep: Option<&str> = None;

    for m in SEPARATOR_RE.find_iter(input) {
        push_segment(&mut segments, pending_sep, &input[last_end..m.start()]);
        pending_sep = Some(m.as_str());
        last_end = m.end();
    }
    push_segment(&mut segments, pending_sep, &input[last_end..]);

    segments
}

fn push_segment<'a>(
    segments: &mut Vec<RecordSegment<'a>>,
    separator: Option<&'a str>,
    raw: &'a str,
) {
    let text = raw.trim_matches(|c| c == '\n' || c == '\r');
    if text.trim().is_empty() {
        if separator.is_some() {
            log::debug!("dropping empty record segment after separator");
        }
        return;
    }
    segments.push(RecordSegment { separator, text });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record_no_separator() {
        let segs = split_records("# Section 1: Company Overview\n");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].separator, None);
    }

    #[test]
    fn test_split_on_separator() {
        let input = "# Section 1: A\n<|RELATED_DOC_SEP-abc123|>\n# Section 1: B\n";
        let segs = split_records(input);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].text, "# Section 1: A");
        assert_eq!(segs[1].separator, Some("<|RELATED_DOC_SEP-abc123|>"));
        assert_eq!(segs[1].text, "# Section 1: B");
    }

    #[test]
    fn test_empty_segments_dropped() {
        let input = "<|RELATED_DOC_SEP-x|>\n\n<|RELATED_DOC_SEP-y|>\n# Section 1: A\n";
        let segs = split_records(input);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].separator, Some("<|RELATED_DOC_SEP-y|>"));
    }
}
