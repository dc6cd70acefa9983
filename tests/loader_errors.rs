use std::path::PathBuf;

use wavefront_lcs::error::{exit_codes, Which};
use wavefront_lcs::sequence::{load_file, Orientation};
use wavefront_lcs::LcsError;

fn scratch(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "wavefront-lcs-{}-{name}.in",
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_and_normalizes_file() {
    let path = scratch("ok", "3 5\nGAC\nAGCAT\n");
    let pair = load_file(&path).unwrap();
    assert_eq!(pair.orientation(), Orientation::Swapped);
    assert_eq!(pair.dominant().as_bytes(), b"AGCAT");
    std::fs::remove_file(path).unwrap();
}

#[test]
fn missing_file_exits_with_open_code() {
    let err = load_file("/nonexistent/wavefront-lcs/input.txt").unwrap_err();
    assert!(matches!(err, LcsError::Open { .. }));
    assert_eq!(err.exit_code(), exit_codes::OPEN);
}

#[test]
fn malformed_header_exits_with_header_code() {
    let path = scratch("header", "three five\nGAC\nAGCAT\n");
    let err = load_file(&path).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::HEADER);
    std::fs::remove_file(path).unwrap();
}

#[test]
fn short_sequence_line_is_reported() {
    let path = scratch("short", "4 2\nGAC\nAG\n");
    let err = load_file(&path).unwrap_err();
    assert!(matches!(
        err,
        LcsError::LengthMismatch {
            which: Which::First,
            declared: 4,
            actual: 3
        }
    ));
    assert_eq!(err.exit_code(), exit_codes::SEQUENCE);
    std::fs::remove_file(path).unwrap();
}
