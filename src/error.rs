//! Error types for catalog fragment parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// A catalog fragment that does not parse into a well-formed element tree
#[derive(Error, Debug, Clone, PartialEq)]
#[error("malformed fragment in catalog entry '{entry}' at offset {offset}: {message}")]
pub struct FragmentError {
    /// Id of the catalog entry the fragment belongs to
    pub entry: String,
    /// The fragment markup as stored in the catalog
    pub markup: String,
    /// Character offset of the error within `markup`
    pub offset: usize,
    pub message: String,
}

impl FragmentError {
    /// Format the error with the fragment source using ariadne
    pub fn format(&self, filename: &str) -> String {
        let mut buf = Vec::new();
        let len = self.markup.chars().count();
        let start = self.offset.min(len);
        let end = (start + 1).min(len);

        let written = Report::build(ReportKind::Error, filename, start)
            .with_message(format!("malformed fragment in entry '{}'", self.entry))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(self.markup.as_str())), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FragmentError {
        FragmentError {
            entry: "1".to_string(),
            markup: r#"<rect x="1"><circle/>"#.to_string(),
            offset: 21,
            message: "unexpected end of stream".to_string(),
        }
    }

    #[test]
    fn test_display_names_entry() {
        let msg = sample().to_string();
        assert!(msg.contains("'1'"));
        assert!(msg.contains("unexpected end of stream"));
    }

    #[test]
    fn test_format_contains_message() {
        let report = sample().format("tz.toml");
        assert!(report.contains("unexpected end of stream"));
        assert!(report.contains("tz.toml"));
    }
}
