//! Integration tests for window extraction
//!
//! Covers the documented extraction scenarios against small temporary files
//! and the fixture files in `tests/data/`.

use fasta_extract::{
    extract, extract_first, ErrorCode, ExtractConfig, ExtractError, ExtractRequest,
    ExtractionSession, Extractions, Window, WindowEnd,
};
use proptest::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn temp_fasta(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

const ONE_RECORD: &[u8] = b">seq1 desc\nACGT\nACGT\n";

#[test]
fn test_whole_sequence() {
    let file = temp_fasta(ONE_RECORD);
    let seq = extract_first(file.path(), "seq1", 0, WindowEnd::Entire).unwrap();
    assert_eq!(seq, b"ACGTACGT");
}

#[test]
fn test_window_over_line_break() {
    let file = temp_fasta(ONE_RECORD);
    let seq = extract_first(file.path(), "seq1", 2, WindowEnd::At(6)).unwrap();
    assert_eq!(seq, b"GTAC");
}

#[test]
fn test_inverted_window_is_empty_not_error() {
    let file = temp_fasta(ONE_RECORD);
    let seq = extract_first(file.path(), "seq1", 6, WindowEnd::At(2)).unwrap();
    assert!(seq.is_empty());
}

#[test]
fn test_second_record_then_no_match() {
    let file = temp_fasta(b">seq1 desc\nACGT\nACGT\n>seq2\nTTGG\nCC\n");
    let request = ExtractRequest::new("seq2");
    let mut session = ExtractionSession::new();

    let seq = session
        .extract(file.path(), &request, &ExtractConfig::first())
        .unwrap();
    assert_eq!(seq, b"TTGGCC");
    assert_eq!(session.header(), Some(&b"seq2"[..]));

    let err = session
        .extract(file.path(), &request, &ExtractConfig::last())
        .unwrap_err();
    assert!(err.is_no_match());
    assert_eq!(session.last_error(), Some(ErrorCode::NoMatch));
}

#[test]
fn test_quality_lines_are_spaced() {
    let file = temp_fasta(b">q\n12345\n67\n");
    let seq = extract_first(file.path(), "q", 0, WindowEnd::Entire).unwrap();
    assert_eq!(seq, b"12345 67");
}

#[test]
fn test_pattern_matching_nothing() {
    let file = temp_fasta(ONE_RECORD);
    let mut session = ExtractionSession::new();

    let err = session
        .extract(file.path(), &ExtractRequest::new("chrX"), &ExtractConfig::single())
        .unwrap_err();

    assert!(matches!(err, ExtractError::NoMatch));
    assert_eq!(session.header(), None);
    assert!(session.captures().is_empty());
    assert_eq!(session.resume_offset(), ONE_RECORD.len());
}

#[test]
fn test_empty_file_has_no_match() {
    let file = temp_fasta(b"");
    let err = extract(file.path(), &ExtractRequest::new(".")).unwrap_err();
    assert!(err.is_no_match());
}

#[test]
fn test_fresh_sessions_are_deterministic() {
    let path = data_path("sample.fa");
    let request = ExtractRequest::new("chr").with_window(Window::new(1, 7));

    let results: Vec<Vec<u8>> = (0..3)
        .map(|_| {
            ExtractionSession::new()
                .extract(&path, &request, &ExtractConfig::single())
                .unwrap()
        })
        .collect();

    // "seq2 chr2 length=20" is the first header containing "chr"
    assert_eq!(results[0], b"ATTACA");
    assert!(results.iter().all(|r| r == &results[0]));
}

#[test]
fn test_every_match_visited_once_in_order() {
    let path = data_path("sample.fa");
    let mut records = Extractions::open(&path, &ExtractRequest::new(".")).unwrap();

    let ids: Vec<Vec<u8>> = records
        .by_ref()
        .map(|e| e.unwrap().matched.id().to_vec())
        .collect();
    assert_eq!(ids, vec![b"seq1".to_vec(), b"seq2".to_vec(), b"chr3".to_vec()]);

    assert!(records.next().is_none());
    assert!(records.is_exhausted());
    assert_eq!(records.session().last_error(), Some(ErrorCode::NoMatch));
}

#[test]
fn test_entire_length_is_sum_of_line_lengths() {
    let path = data_path("sample.fa");
    let content = std::fs::read(&path).unwrap();

    // Unwrapped lengths computed independently from the raw text
    let mut expected = Vec::new();
    for line in content.split(|&b| b == b'\n') {
        if line.starts_with(b">") {
            expected.push(0usize);
        } else if let Some(last) = expected.last_mut() {
            *last += line.len();
        }
    }

    let lengths: Vec<usize> = Extractions::open(&path, &ExtractRequest::new("."))
        .unwrap()
        .map(|e| e.unwrap().sequence.len())
        .collect();
    assert_eq!(lengths, expected);
    assert_eq!(lengths, vec![8, 20, 10]);
}

#[test]
fn test_ragged_record_with_blank_line() {
    let path = data_path("sample.fa");
    let seq = extract_first(&path, "^chr3", 0, WindowEnd::Entire).unwrap();
    assert_eq!(seq, b"ACGTACGTTA");

    let seq = extract_first(&path, "^chr3", 6, WindowEnd::At(9)).unwrap();
    assert_eq!(seq, b"GTT");
}

#[test]
fn test_quality_fixture() {
    let path = data_path("sample.qual");
    let values: Vec<Vec<u8>> = Extractions::open(&path, &ExtractRequest::new("read"))
        .unwrap()
        .map(|e| e.unwrap().sequence)
        .collect();

    assert_eq!(values[0], b"40 40 38 37 12345 67 30");
    assert_eq!(values[1], b"20 21 22");
}

#[test]
fn test_spacer_does_not_shorten_window() {
    let path = data_path("sample.qual");
    // 15 bases from offset 3: "40 38 37 12345" (14) + "6"
    let seq = extract_first(&path, "read1", 3, WindowEnd::At(18)).unwrap();
    assert_eq!(seq, b"40 38 37 12345 6");
}

#[test]
fn test_marker_inside_line_is_content() {
    let file = temp_fasta(b">a\nAC>GT\n>b\nTT\n");
    let seq = extract_first(file.path(), "^a$", 0, WindowEnd::Entire).unwrap();
    assert_eq!(seq, b"AC>GT");
}

#[test]
fn test_basic_and_extended_syntax() {
    let file = temp_fasta(b">gi|123|ref\nAC\n>gi|456|ref\nGT\n");

    // In basic syntax `|` is a literal
    let seq = extract(file.path(), &ExtractRequest::new("gi|456")).unwrap();
    assert_eq!(seq, b"GT");

    // In extended syntax it is alternation
    let request = ExtractRequest::new("456|123").extended(true);
    assert_eq!(extract(file.path(), &request).unwrap(), b"AC");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Headers of any length come back byte-for-byte
    #[test]
    fn test_header_round_trip(header in "[!-~][ -~]{0,2000}") {
        let mut content = Vec::new();
        content.push(b'>');
        content.extend_from_slice(header.as_bytes());
        content.extend_from_slice(b"\nACGT\n");
        let file = temp_fasta(&content);

        let mut session = ExtractionSession::new();
        let seq = session
            .extract(file.path(), &ExtractRequest::new(""), &ExtractConfig::single())
            .unwrap();

        prop_assert_eq!(seq, b"ACGT".to_vec());
        prop_assert_eq!(session.header().unwrap(), header.as_bytes());
    }

    /// An inverted window is empty whether or not the header matches
    #[test]
    fn test_inverted_window_never_errors(start in 1u64..100, back in 1u64..100) {
        let file = temp_fasta(b">seq1\nACGTACGT\nACGT\n");
        let end = start.saturating_sub(back);
        let seq = extract_first(file.path(), "seq1", start, WindowEnd::At(end)).unwrap();
        prop_assert!(seq.is_empty());
    }
}
