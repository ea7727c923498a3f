//! Load-time escaping of template static text.
//!
//! Literal text in a template counts as plain text for the markdown mode
//! and is escaped before the template is compiled. Expressions, statements
//! and comments are left for the engine; text inside `{% raw %}` blocks is
//! author-trusted markup and passes through verbatim.

use crate::escape::escape;

/// Escape the static text of a template source.
///
/// Each literal chunk is escaped exactly once. `{{ }}`, `{% %}` and
/// `{# #}` regions are copied unchanged, as is everything between
/// `{% raw %}` and `{% endraw %}`. An unterminated delimiter is copied
/// through untouched so the engine can report the syntax error itself.
#[must_use]
pub fn escape_source(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + source.len() / 8);
    let mut rest = source;
    let mut in_raw = false;

    while !rest.is_empty() {
        if in_raw {
            // Only `{% endraw %}` ends the block; everything else is literal.
            let Some(pos) = rest.find("{%") else {
                out.push_str(rest);
                break;
            };
            let (text, tail) = rest.split_at(pos);
            out.push_str(text);
            match split_tag(tail, "%}") {
                Some((tag, after)) => {
                    if tag_name(tag) == Some("endraw") {
                        in_raw = false;
                    }
                    out.push_str(tag);
                    rest = after;
                }
                None => {
                    out.push_str(tail);
                    break;
                }
            }
            continue;
        }

        let next = ["{{", "{%", "{#"]
            .iter()
            .filter_map(|d| rest.find(d).map(|p| (p, *d)))
            .min_by_key(|&(p, _)| p);

        let Some((pos, delim)) = next else {
            out.push_str(&escape(rest));
            break;
        };

        let (text, tail) = rest.split_at(pos);
        out.push_str(&escape(text));

        let closer = match delim {
            "{{" => "}}",
            "{%" => "%}",
            _ => "#}",
        };
        match split_tag(tail, closer) {
            Some((tag, after)) => {
                if delim == "{%" && tag_name(tag) == Some("raw") {
                    in_raw = true;
                }
                out.push_str(tag);
                rest = after;
            }
            None => {
                out.push_str(tail);
                break;
            }
        }
    }

    out
}

/// Split off a delimited region starting at the 2-byte opener of `text`,
/// up to and including `closer`. `None` if the closer never appears.
///
/// The closer is only matched outside string literals: the engine accepts
/// expressions like `{{ "a}}b" }}`, so a `}}` inside single or double
/// quotes (with backslash escapes) must not end the region.
fn split_tag<'a>(text: &'a str, closer: &str) -> Option<(&'a str, &'a str)> {
    let bytes = text.as_bytes();
    let mut i = 2;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        match quote {
            Some(q) => {
                if bytes[i] == b'\\' {
                    i += 1;
                } else if bytes[i] == q {
                    quote = None;
                }
            }
            None => {
                if bytes[i] == b'\'' || bytes[i] == b'"' {
                    quote = Some(bytes[i]);
                } else if bytes[i..].starts_with(closer.as_bytes()) {
                    return Some(text.split_at(i + closer.len()));
                }
            }
        }
        i += 1;
    }
    None
}

/// First word of a `{% ... %}` body, whitespace-control dashes stripped.
fn tag_name(tag: &str) -> Option<&str> {
    let body = tag.strip_prefix("{%")?.strip_suffix("%}")?;
    let body = body.trim_matches(|c: char| c == '-' || c.is_whitespace());
    body.split_whitespace().next()
}
