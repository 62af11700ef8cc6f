//! Error adapter for converting CorkboardError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Board syntax
//! errors keep their source text, so the offending span is shown in place.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use corkboard::CorkboardError;

/// Adapter for a TOML syntax or schema error in a board file.
pub struct ParseErrorAdapter<'a> {
    err: &'a toml::de::Error,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> ParseErrorAdapter<'a> {
    pub fn new(err: &'a toml::de::Error, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.message().trim_end())
    }
}

impl std::error::Error for ParseErrorAdapter<'_> {}

impl MietteDiagnostic for ParseErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("corkboard::parse"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span_to_miette(span)),
        )))
    }
}

/// Adapter for non-parse [`CorkboardError`] variants.
pub struct ErrorAdapter<'a>(pub &'a CorkboardError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CorkboardError::Io(_) => "corkboard::io",
            CorkboardError::Parse { .. } => "corkboard::parse",
            CorkboardError::Board(_) => "corkboard::board",
            CorkboardError::Config(_) => "corkboard::config",
            CorkboardError::Export(_) => "corkboard::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CorkboardError::Board(_) => Some(Box::new(
                "months run from 1 to 12 and ring children must name an existing parent",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    Parse(ParseErrorAdapter<'a>),
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(p) => std::error::Error::source(p),
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// Convert a [`CorkboardError`] into a reportable error.
///
/// [`CorkboardError::Parse`] keeps its source so the span can be labeled;
/// every other variant is reported by message and code.
pub fn to_reportable(err: &CorkboardError) -> Reportable<'_> {
    match err {
        CorkboardError::Parse { err, src } => Reportable::Parse(ParseErrorAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(src: &str) -> CorkboardError {
        let err = toml::from_str::<toml::Table>(src).unwrap_err();
        CorkboardError::new_parse_error(err, src)
    }

    #[test]
    fn test_parse_error_is_labeled() {
        let err = parse_error("[annotations]\ntrack_width = = 3\n");

        let reportable = to_reportable(&err);

        assert!(matches!(reportable, Reportable::Parse(_)));
        assert!(reportable.source_code().is_some());
        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].label(), Some("here"));
    }

    #[test]
    fn test_parse_error_message_has_no_snippet() {
        let err = parse_error("title = \n");

        let message = to_reportable(&err).to_string();

        assert!(!message.contains("line 1"), "{message}");
        assert!(!message.is_empty());
    }

    #[test]
    fn test_error_codes() {
        let cases = [
            (CorkboardError::Board("bad month".to_string()), "corkboard::board"),
            (CorkboardError::Config("bad color".to_string()), "corkboard::config"),
            (CorkboardError::Export("bad size".to_string()), "corkboard::export"),
        ];

        for (err, code) in cases {
            let reportable = to_reportable(&err);
            assert_eq!(reportable.code().unwrap().to_string(), code);
            assert!(reportable.labels().is_none());
        }
    }

    #[test]
    fn test_non_parse_error_message() {
        let err = CorkboardError::Board("event `Analyst` has month 13 outside 1..=12".to_string());

        let reportable = to_reportable(&err);

        assert_eq!(
            reportable.to_string(),
            "Invalid board: event `Analyst` has month 13 outside 1..=12"
        );
        assert!(reportable.help().is_some());
    }
}
