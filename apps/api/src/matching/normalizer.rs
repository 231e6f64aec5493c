//! Text normalization shared by all matching.
//!
//! Extraction and matching operate on two distinct views of the same input:
//! the section extractor needs the original line structure, while substring
//! matching and the embedded `job_description` field need a flattened,
//! quote-safe haystack. All functions here are pure.

/// Collapses every newline run (and surrounding spaces) into a single space.
pub fn flatten(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch == '\n' || ch == '\r' {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() && !out.ends_with(' ') && ch != ' ' {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        }
    }
    out
}

/// Replaces double quotes with single quotes so the text can be embedded in
/// a JSON string field without escaping surprises downstream.
pub fn normalize_quotes(text: &str) -> String {
    text.replace('"', "'")
}

/// The flattened, quote-normalized view used for matching and for the
/// `job_description` report field.
pub fn matching_view(text: &str) -> String {
    normalize_quotes(&flatten(text))
}

/// Case-insensitive boundary-aware containment for short vocabulary terms.
///
/// Plain substring matching is correct for multi-word skill phrases, but
/// degree and tool keywords like "mba" would otherwise match inside
/// unrelated words ("combat"). A boundary is any non-alphanumeric character
/// or the start/end of the haystack.
pub fn contains_word(haystack: &str, word: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let word = word.to_lowercase();
    if word.is_empty() {
        return false;
    }
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(&word) {
        let begin = start + pos;
        let end = begin + word.len();
        let left_ok = begin == 0
            || !haystack[..begin]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let right_ok = end == haystack.len()
            || !haystack[end..].chars().next().is_some_and(|c| c.is_alphanumeric());
        if left_ok && right_ok {
            return true;
        }
        start = begin + 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_collapses_newline_runs() {
        assert_eq!(flatten("a\nb"), "a b");
        assert_eq!(flatten("a\n\n\nb"), "a b");
        assert_eq!(flatten("a\r\nb"), "a b");
    }

    #[test]
    fn test_flatten_no_leading_or_double_spaces() {
        assert_eq!(flatten("\n\na\nb\n"), "a b");
        assert_eq!(flatten("a\n b"), "a b");
        assert_eq!(flatten("a \nb"), "a b");
    }

    #[test]
    fn test_flatten_preserves_inner_text() {
        assert_eq!(flatten("Python, SQL"), "Python, SQL");
    }

    #[test]
    fn test_normalize_quotes() {
        assert_eq!(normalize_quotes(r#"said "hello""#), "said 'hello'");
    }

    #[test]
    fn test_matching_view_combines_both() {
        assert_eq!(matching_view("a \"b\"\nc"), "a 'b' c");
    }

    #[test]
    fn test_contains_word_respects_boundaries() {
        assert!(contains_word("Holds an MBA from IIM", "mba"));
        assert!(!contains_word("hand-to-hand combat training", "mba"));
        assert!(contains_word("B.Tech in CSE", "b.tech"));
    }

    #[test]
    fn test_contains_word_punctuation_is_boundary() {
        assert!(contains_word("certified (PMP), 2020", "pmp"));
    }
}
