//! Error adapter for converting StackmapError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use stackmap::StackmapError;

/// Adapter giving a [`StackmapError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a StackmapError);

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
        let code = match self.0 {
            StackmapError::Io(_) => "stackmap::io",
            StackmapError::Json(_) => "stackmap::descriptor",
            StackmapError::Config(_) => "stackmap::config",
            StackmapError::DuplicateId(_) => "stackmap::duplicate_id",
            StackmapError::Export(_) => "stackmap::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            StackmapError::Io(_) => {
                "check that the input file exists and the output path is writable"
            }
            StackmapError::Json(_) => {
                "a descriptor is a JSON object whose `style` is one of `architecture`, \
                 `service_grid`, `layered_architecture` or `tech_stack`"
            }
            StackmapError::Config(_) => {
                "fix the configuration file or pass a different one with --config"
            }
            StackmapError::DuplicateId(_) => {
                "rename one of the nodes, or set `duplicate_ids = \"first_wins\"` under [layout]"
            }
            StackmapError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wraps an error for rendering by miette.
pub fn to_reportable(err: &StackmapError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = StackmapError::DuplicateId("api".to_string());
        let adapter = to_reportable(&err);

        assert_eq!(
            adapter.code().unwrap().to_string(),
            "stackmap::duplicate_id"
        );
        assert!(adapter.help().unwrap().to_string().contains("first_wins"));
        assert_eq!(adapter.to_string(), "Duplicate node id `api`");
    }

    #[test]
    fn test_json_error_has_help() {
        let err = stackmap::DiagramBuilder::default().parse("{").unwrap_err();
        assert!(matches!(err, StackmapError::Json(_)));
        let adapter = to_reportable(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "stackmap::descriptor");
        assert!(adapter.help().unwrap().to_string().contains("tech_stack"));
    }

    #[test]
    fn test_export_error_without_help() {
        let err = StackmapError::Export(Box::new(std::io::Error::other("disk full")));
        let adapter = to_reportable(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "stackmap::export");
        assert!(adapter.help().is_none());
        assert!(adapter.labels().is_none());
    }
}
