//! Integration tests for failure diagnostics
//!
//! Failures are logged at error level unless the call suppresses diagnostics;
//! running off the end of the file is never logged as an error.

use fasta_extract::{ExtractConfig, ExtractRequest, ExtractionSession, Extractions};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::io::Write;
use std::sync::Once;
use tempfile::NamedTempFile;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

/// Logger that keeps records per thread, so parallel tests stay isolated
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Run `f` and return the error-level messages it logged
fn errors_logged<F: FnOnce()>(f: F) -> Vec<String> {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("Failed to install logger");
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());

    f();

    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, message)| message.clone())
            .collect()
    })
}

const MISSING: &str = "/nonexistent/dir/missing.fa";

#[test]
fn test_open_failure_logged_once() {
    let errors = errors_logged(|| {
        let mut session = ExtractionSession::new();
        let result = session.extract(MISSING, &ExtractRequest::new("."), &ExtractConfig::single());
        assert!(result.is_err());
    });

    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("missing.fa"));
}

#[test]
fn test_suppressed_failure_not_logged() {
    let errors = errors_logged(|| {
        let mut session = ExtractionSession::new();
        let config = ExtractConfig::single().with_suppressed_diagnostics(true);
        let result = session.extract(MISSING, &ExtractRequest::new("."), &config);
        assert!(result.is_err());
    });

    assert!(errors.is_empty());
}

#[test]
fn test_no_match_not_logged_as_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b">seq1\nACGT\n").unwrap();
    file.flush().unwrap();

    let errors = errors_logged(|| {
        let mut session = ExtractionSession::new();
        let err = session
            .extract(file.path(), &ExtractRequest::new("chrX"), &ExtractConfig::single())
            .unwrap_err();
        assert!(err.is_no_match());

        let count = Extractions::open(file.path(), &ExtractRequest::new("."))
            .unwrap()
            .count();
        assert_eq!(count, 1);
    });

    assert!(errors.is_empty());
}

#[test]
fn test_iterator_open_failure_suppressed() {
    let errors = errors_logged(|| {
        let result = Extractions::open_with(MISSING, &ExtractRequest::new("."), 0, true);
        assert!(result.is_err());

        let result = Extractions::open_with(MISSING, &ExtractRequest::new(r"\("), 0, true);
        assert!(result.is_err());
    });
    assert!(errors.is_empty());

    let errors = errors_logged(|| {
        assert!(Extractions::open(MISSING, &ExtractRequest::new(".")).is_err());
    });
    assert_eq!(errors.len(), 1);
}
