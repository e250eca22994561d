//! Payloads written to the diagnostic log

use std::fmt::Write as _;

/// Body of one diagnostic log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogPayload {
    Text(String),
    /// Rendered one `key => value` line per field.
    Fields(Vec<(String, String)>),
}

impl LogPayload {
    pub fn fields<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fields(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Human-readable multi-line text.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Fields(fields) => {
                let mut out = String::new();
                for (idx, (key, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        out.push('\n');
                    }
                    let _ = write!(out, "{key} => {value}");
                }
                out
            }
        }
    }
}

impl From<String> for LogPayload {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for LogPayload {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_renders_verbatim() {
        assert_eq!(LogPayload::from("[]").render(), "[]");
    }

    #[test]
    fn fields_render_one_per_line() {
        let payload = LogPayload::fields([("field", "email"), ("values[0]", "ada@example.com")]);
        assert_eq!(payload.render(), "field => email\nvalues[0] => ada@example.com");
    }

    #[test]
    fn empty_fields_render_empty() {
        assert_eq!(LogPayload::Fields(Vec::new()).render(), "");
    }
}
