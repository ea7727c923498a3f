//! Markdown output format for minijinja environments.
//!
//! Installs markdown as the active escaping mode: interpolated values are
//! routed through [`escape`](crate::escape) unless already marked safe.
//! A `markdown` filter is registered as a safe passthrough so the engine
//! never applies its own markdown conversion on top of escaped output.

use std::fmt::Write as _;

use minijinja::value::Value;
use minijinja::{escape_formatter, AutoEscape, Environment, Error, Output, State};

use crate::escape::escape;

/// Token identifying the markdown escaping mode.
pub const FORMAT_NAME: &str = "markdown";

/// Mime type of the markdown output format. No other format is advertised.
pub const MIME_TYPE: &str = "text/markdown";

/// Install the markdown output format on an environment.
///
/// Every template rendered by the environment uses markdown as its escaping
/// mode, regardless of template name or extension.
pub fn install(env: &mut Environment<'_>) {
    env.set_auto_escape_callback(|_name| AutoEscape::Custom(FORMAT_NAME));
    env.set_formatter(markdown_formatter);
    env.add_filter("markdown", markdown_filter);
}

/// Formatter applying markdown escaping to plain values.
///
/// Safe-marked values (from the `safe` or `markdown` filters) are written
/// verbatim; everything else is escaped exactly once. Non-markdown escape
/// states defer to the engine's stock formatter.
fn markdown_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), Error> {
    match state.auto_escape() {
        AutoEscape::Custom(name) if name == FORMAT_NAME && !value.is_safe() => {
            match value.as_str() {
                Some(text) => write!(out, "{}", escape(text))?,
                None => write!(out, "{}", escape(&value.to_string()))?,
            }
            Ok(())
        }
        _ => escape_formatter(out, state, value),
    }
}

/// Passthrough suppressing any engine-side markdown conversion.
///
/// Marks the input safe so the formatter writes it verbatim.
fn markdown_filter(value: String) -> Value {
    Value::from_safe_string(value)
}
