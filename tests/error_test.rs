//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use lungvision_rust::config::Config;
use lungvision_rust::error::LungVisionError;
use lungvision_rust::loader;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_read_nonexistent_file() {
    let result = loader::read_image_file(Path::new("/nonexistent/path/xray.png"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, LungVisionError::FileNotFound(_)));
}

/// 壊れた設定ファイル
#[test]
fn test_broken_config_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ endpoint: ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, LungVisionError::JsonParse(_)));
}

/// LungVisionErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        LungVisionError::Config("テスト設定エラー".to_string()),
        LungVisionError::InvalidEndpoint("localhost".to_string()),
        LungVisionError::FileNotFound("xray.png".to_string()),
        LungVisionError::ImageLoad("xray.png".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// InvalidEndpointエラーのメッセージ確認
#[test]
fn test_invalid_endpoint_message() {
    let err = LungVisionError::InvalidEndpoint("localhost:5000".to_string());
    let display = format!("{}", err);

    assert!(display.contains("localhost:5000"));
    assert!(display.contains("lungvision config"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: LungVisionError = io_err.into();

    assert!(matches!(err, LungVisionError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: LungVisionError = json_err.into();

    assert!(matches!(err, LungVisionError::JsonParse(_)));
}

/// セッションエラーからの変換
#[test]
fn test_session_error_conversion() {
    let err: LungVisionError = lungvision_common::Error::NoImageSelected.into();

    assert!(matches!(
        err,
        LungVisionError::Session(lungvision_common::Error::NoImageSelected)
    ));
}

/// エラーチェーン（透過的エラー）
#[test]
fn test_error_chain_transparent() {
    let common_err = lungvision_common::Error::MalformedResponse("classification がありません".to_string());
    let err: LungVisionError = common_err.into();

    // 透過的エラーなのでメッセージがそのまま表示される
    let display = format!("{}", err);
    assert_eq!(display, "Malformed response: classification がありません");
}
