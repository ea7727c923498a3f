//! Backslash escaping for markdown text literals.
//!
//! Covers the character set from the markdown backslash-escape syntax:
//! <https://daringfireball.net/projects/markdown/syntax#backslash>

/// Whether a character must be backslash-escaped in markdown text.
fn needs_escape(c: char) -> bool {
    matches!(
        c,
        '\\' | '`' | '*' | '_' | '{' | '}' | '[' | ']' | '(' | ')' | '#' | '+' | '-' | '.' | '!'
    )
}

/// Escape markdown special characters with a backslash.
///
/// A single pass over the input: every special character (the backslash
/// included) gets a backslash prefix, and backslashes introduced by the
/// escaping are never re-escaped. The function is total on any input and
/// deliberately not idempotent - applying it twice compounds the escapes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if needs_escape(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECIAL: &str = "\\`*_{}[]()#+-.!";

    #[test]
    fn escapes_every_special_character() {
        for c in SPECIAL.chars() {
            let input = format!("a{c}b");
            let expected = format!("a\\{c}b");
            assert_eq!(escape(&input), expected, "character {c:?}");
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(escape(""), "");
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(escape("hello world 123"), "hello world 123");
    }

    #[test]
    fn escapes_backslash_before_other_specials() {
        // Literal backslash followed by star: both get their own escape,
        // the introduced backslashes are not escaped again.
        assert_eq!(escape("\\*"), "\\\\\\*");
    }

    #[test]
    fn double_escaping_compounds() {
        let once = escape("*");
        let twice = escape(&once);
        assert_eq!(once, "\\*");
        assert_eq!(twice, "\\\\\\*");
        assert_ne!(twice, once);
    }

    #[test]
    fn escapes_markdown_sentence() {
        assert_eq!(escape("Hello *world*!"), "Hello \\*world\\*\\!");
    }

    #[test]
    fn escapes_version_string() {
        assert_eq!(escape("1.2.3"), "1\\.2\\.3");
    }

    #[test]
    fn preserves_non_ascii_text() {
        assert_eq!(escape("héllo wörld"), "héllo wörld");
    }
}
