//! Uncertainty-span markup
//!
//! Reviewers flag uncertain readings as `⟅...⟆`. The editing surface
//! suppresses the leading marker glyph (it breaks the input highlighting
//! there), so the canonical stored form — marker glyph followed by the
//! delimited span — is restored here before records reach the store.
//!
//! Matching is an explicit left-to-right scan, not a regex: a span is the
//! shortest non-empty run after `⟅` that contains no `⟆`, optionally
//! preceded by the marker glyph. Anything that does not match (unterminated
//! `⟅`, empty `⟅⟆`, stray `⟆`) passes through untouched; a reviewer typo
//! must never destroy reviewer text.

/// Opening delimiter of an uncertain span
pub const SPAN_OPEN: char = '⟅';
/// Closing delimiter of an uncertain span
pub const SPAN_CLOSE: char = '⟆';
/// Marker glyph prefixed to spans in canonical storage form
pub const UNCERTAINTY_MARKER: char = '🤔';

/// Find the end of the span opening at `open` (byte index of `⟅`).
///
/// Returns the byte range of the span content when the span is well formed
/// (non-empty, terminated), `None` otherwise.
fn span_content(text: &str, open: usize) -> Option<(usize, usize)> {
    let content_start = open + SPAN_OPEN.len_utf8();
    let rel_close = text[content_start..].find(SPAN_CLOSE)?;
    if rel_close == 0 {
        // Empty span, not a match
        return None;
    }
    Some((content_start, content_start + rel_close))
}

/// Rewrite all uncertain spans to canonical storage form.
///
/// Each well-formed span is emitted as marker glyph + `⟅content⟆` whether
/// or not the marker was present in the input. Idempotent: canonical form
/// rewrites to itself.
pub fn normalize_for_storage(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let Some(open) = rest.find(SPAN_OPEN) else {
            out.push_str(rest);
            return out;
        };
        let Some((start, end)) = span_content(rest, open) else {
            // Malformed: copy through the opening delimiter and keep going
            let after_open = open + SPAN_OPEN.len_utf8();
            out.push_str(&rest[..after_open]);
            rest = &rest[after_open..];
            continue;
        };
        // Absorb a marker glyph immediately before the span so it is not
        // emitted twice
        let prefix = rest[..open].strip_suffix(UNCERTAINTY_MARKER).unwrap_or(&rest[..open]);
        out.push_str(prefix);
        out.push(UNCERTAINTY_MARKER);
        out.push(SPAN_OPEN);
        out.push_str(&rest[start..end]);
        out.push(SPAN_CLOSE);
        rest = &rest[end + SPAN_CLOSE.len_utf8()..];
    }
}

/// Iterate over the content of each well-formed uncertain span, in order.
pub fn uncertain_spans(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        loop {
            let open = rest.find(SPAN_OPEN)?;
            match span_content(rest, open) {
                Some((start, end)) => {
                    let content = &rest[start..end];
                    rest = &rest[end + SPAN_CLOSE.len_utf8()..];
                    return Some(content);
                }
                None => {
                    rest = &rest[open + SPAN_OPEN.len_utf8()..];
                }
            }
        }
    })
}

/// Replace every round 's' with the long s 'ſ' used in historical prints.
pub fn fix_long_s(text: &str) -> String {
    text.replace('s', "ſ")
}

/// Replace modern umlauts with their historical superscript-e forms.
pub fn fix_umlauts(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            'ä' => out.push_str("aͤ"),
            'ö' => out.push_str("oͤ"),
            'ü' => out.push_str("uͤ"),
            'Ä' => out.push_str("Aͤ"),
            'Ö' => out.push_str("Oͤ"),
            'Ü' => out.push_str("Uͤ"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_added_when_absent() {
        assert_eq!(normalize_for_storage("foo⟅bar⟆baz"), "foo🤔⟅bar⟆baz");
    }

    #[test]
    fn test_marker_preserved_when_present() {
        assert_eq!(normalize_for_storage("foo🤔⟅bar⟆baz"), "foo🤔⟅bar⟆baz");
    }

    #[test]
    fn test_unterminated_span_untouched() {
        assert_eq!(normalize_for_storage("foo⟅bar"), "foo⟅bar");
    }

    #[test]
    fn test_empty_span_untouched() {
        assert_eq!(normalize_for_storage("foo⟅⟆bar"), "foo⟅⟆bar");
        assert_eq!(normalize_for_storage("foo🤔⟅⟆bar"), "foo🤔⟅⟆bar");
    }

    #[test]
    fn test_stray_close_untouched() {
        assert_eq!(normalize_for_storage("foo⟆bar"), "foo⟆bar");
    }

    #[test]
    fn test_multiple_spans_rewritten_left_to_right() {
        assert_eq!(
            normalize_for_storage("a⟅b⟆c🤔⟅d⟆e⟅f⟆"),
            "a🤔⟅b⟆c🤔⟅d⟆e🤔⟅f⟆"
        );
    }

    #[test]
    fn test_shortest_match_wins() {
        // The first close delimiter terminates the span; the second stays
        assert_eq!(normalize_for_storage("⟅ab⟆cd⟆"), "🤔⟅ab⟆cd⟆");
    }

    #[test]
    fn test_nested_open_kept_in_content() {
        // Content is the shortest run without a close delimiter, so an
        // inner open delimiter belongs to the span
        assert_eq!(normalize_for_storage("⟅a⟅b⟆"), "🤔⟅a⟅b⟆");
    }

    #[test]
    fn test_marker_without_span_untouched() {
        assert_eq!(normalize_for_storage("foo🤔bar"), "foo🤔bar");
    }

    #[test]
    fn test_idempotent() {
        let cases = [
            "foo⟅bar⟆baz",
            "foo🤔⟅bar⟆baz",
            "foo⟅bar",
            "a⟅b⟆c⟅⟆d🤔⟅e⟆",
            "plain text",
            "",
        ];
        for case in cases {
            let once = normalize_for_storage(case);
            assert_eq!(normalize_for_storage(&once), once, "input: {case}");
        }
    }

    #[test]
    fn test_uncertain_spans_extraction() {
        let spans: Vec<&str> = uncertain_spans("a⟅b⟆c⟅⟆d🤔⟅ef⟆g⟅hi").collect();
        assert_eq!(spans, vec!["b", "ef"]);
    }

    #[test]
    fn test_fix_long_s() {
        assert_eq!(fix_long_s("dass"), "daſſ");
    }

    #[test]
    fn test_fix_umlauts() {
        assert_eq!(fix_umlauts("Über schön"), "Uͤber schoͤn");
        assert_eq!(fix_umlauts("ärgern"), "aͤrgern");
    }
}
