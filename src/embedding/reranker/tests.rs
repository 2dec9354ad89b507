use super::*;
use std::path::PathBuf;

#[test]
fn test_config_default() {
    let config = RerankerConfig::default();

    assert!(config.model_path.is_none());
    assert_eq!(config.max_seq_len, MAX_SEQ_LEN);
    assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
}

#[test]
fn test_config_new() {
    let config = RerankerConfig::new("/models/ms-marco-MiniLM-L-6-v2");

    assert_eq!(
        config.model_path,
        Some(PathBuf::from("/models/ms-marco-MiniLM-L-6-v2"))
    );
}

#[test]
fn test_config_with_batch_size() {
    let config = RerankerConfig::default().with_batch_size(4);
    assert_eq!(config.batch_size, 4);
}

#[test]
#[should_panic(expected = "batch_size must be greater than 0")]
fn test_config_zero_batch_size_panics() {
    let _ = RerankerConfig::default().with_batch_size(0);
}

#[test]
fn test_config_validate() {
    assert!(RerankerConfig::default().validate().is_ok());

    let invalid = RerankerConfig {
        batch_size: 0,
        ..Default::default()
    };
    assert!(invalid.validate().is_err());

    let empty_path = RerankerConfig {
        model_path: Some(PathBuf::new()),
        ..Default::default()
    };
    assert!(empty_path.validate().is_err());
}

#[test]
fn test_stub_is_unavailable() {
    let reranker = Reranker::stub();
    assert!(!reranker.is_model_loaded());
}

#[test]
fn test_stub_score_batch_not_available() {
    let reranker = Reranker::stub();

    let result = reranker.score_batch("query", &["a", "b"]);
    assert!(matches!(result, Err(RerankerError::NotAvailable { .. })));
}

#[test]
fn test_load_with_missing_model() {
    let config = RerankerConfig::new("/nonexistent/path/reranker");
    let result = Reranker::load(config);

    assert!(matches!(result, Err(RerankerError::ModelNotFound { .. })));
}

#[test]
fn test_load_with_incomplete_model_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "{}").unwrap();

    let result = Reranker::load(RerankerConfig::new(dir.path()));

    match result {
        Err(RerankerError::ModelLoadFailed { reason }) => {
            assert!(reason.contains("model.safetensors"));
        }
        other => panic!("expected ModelLoadFailed, got {:?}", other),
    }
}

#[test]
fn test_load_invalid_config() {
    let config = RerankerConfig {
        max_seq_len: 0,
        ..Default::default()
    };
    assert!(matches!(
        Reranker::load(config),
        Err(RerankerError::InvalidConfig { .. })
    ));
}

#[test]
fn test_load_or_unavailable_swallows_load_failure() {
    let reranker = Reranker::load_or_unavailable(RerankerConfig::new("/nonexistent/path/reranker"));

    assert!(!reranker.is_model_loaded());
    assert_eq!(
        reranker.config().model_path,
        Some(PathBuf::from("/nonexistent/path/reranker"))
    );
}

#[test]
fn test_corrupt_weights_leave_reranker_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "not json").unwrap();
    std::fs::write(dir.path().join("model.safetensors"), b"garbage").unwrap();
    std::fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();

    let reranker = Reranker::load_or_unavailable(RerankerConfig::new(dir.path()));
    assert!(!reranker.is_model_loaded());
}
