use std::fs;
use std::io::ErrorKind;

use tally_engine::{decode_text, read_text_file, IntakeError};
use tempfile::TempDir;

#[tokio::test]
async fn reads_utf8_file_fully() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notes.txt");
    let body = "line one\nline two — ünïcödé\n".repeat(1000);
    fs::write(&path, &body).unwrap();

    let loaded = read_text_file(&path).await.unwrap();
    assert_eq!(loaded.text, body);
    assert_eq!(loaded.byte_len, body.len() as u64);
    assert_eq!(loaded.encoding_label, "UTF-8");
    assert_eq!(loaded.path, path);
}

#[tokio::test]
async fn empty_file_is_empty_text() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("empty.txt");
    fs::write(&path, b"").unwrap();

    let loaded = read_text_file(&path).await.unwrap();
    assert_eq!(loaded.text, "");
    assert_eq!(loaded.byte_len, 0);
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let result = read_text_file(&temp.path().join("absent.txt")).await;
    match result {
        Err(IntakeError::Io { kind, message }) => {
            assert_eq!(kind, ErrorKind::NotFound);
            assert!(!message.is_empty());
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    let result = read_text_file(temp.path()).await;
    assert!(matches!(result, Err(IntakeError::Io { .. })));
}

#[test]
fn utf16_bom_is_honoured() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "hi there".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let decoded = decode_text(bytes).unwrap();
    assert_eq!(decoded.text, "hi there");
    assert_eq!(decoded.encoding_label, "UTF-16LE");
}

#[test]
fn utf8_bom_is_stripped() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("abc".as_bytes());
    let decoded = decode_text(bytes).unwrap();
    assert_eq!(decoded.text, "abc");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn legacy_single_byte_text_falls_back_to_detection() {
    let bytes =
        b"Le caf\xe9 cr\xe8me est d\xe9j\xe0 servi pr\xe8s de la fen\xeatre, tr\xe8s chaud."
            .to_vec();
    let decoded = decode_text(bytes).unwrap();
    assert!(decoded.text.starts_with("Le caf"));
    assert!(!decoded.text.contains('\u{FFFD}'));
    assert_ne!(decoded.encoding_label, "UTF-8");
}
