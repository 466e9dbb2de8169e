//! Classification of a candidate read.

use std::io;

/// What reading a candidate produced.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The file exists and its text is ready for parsing.
    Found(String),
    /// Nothing exists at the path; the search moves on.
    NotFound(io::Error),
    /// The file exists but could not be read; the search stops.
    Failed(io::Error),
}

/// Classifies the result of reading a candidate.
///
/// Only `ErrorKind::NotFound` lets the search continue. Permission errors,
/// directories in place of files and invalid UTF-8 are failures; the caller
/// decides whether they are read or input errors.
#[must_use]
pub fn classify(outcome: io::Result<String>) -> ProbeOutcome {
    match outcome {
        Ok(text) => ProbeOutcome::Found(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => ProbeOutcome::NotFound(err),
        Err(err) => ProbeOutcome::Failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn text_is_found() {
        let outcome = classify(Ok(String::from("a: 1")));
        assert!(matches!(outcome, ProbeOutcome::Found(text) if text == "a: 1"));
    }

    #[test]
    fn missing_files_are_skipped() {
        let outcome = classify(Err(io::Error::from(io::ErrorKind::NotFound)));
        assert!(matches!(outcome, ProbeOutcome::NotFound(_)));
    }

    #[rstest]
    #[case(io::ErrorKind::PermissionDenied)]
    #[case(io::ErrorKind::IsADirectory)]
    #[case(io::ErrorKind::InvalidData)]
    #[case(io::ErrorKind::Other)]
    fn other_failures_stop_the_search(#[case] kind: io::ErrorKind) {
        let outcome = classify(Err(io::Error::from(kind)));
        let ProbeOutcome::Failed(err) = outcome else {
            panic!("expected a failure for {kind:?}");
        };
        assert_eq!(err.kind(), kind);
    }
}
