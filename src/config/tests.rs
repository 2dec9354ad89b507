use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const SIEVE_VARS: [&str; 14] = [
    "SIEVE_RERANKER_PATH",
    "SIEVE_FAST_RERANKER",
    "SIEVE_ORACLE_MODEL",
    "SIEVE_ORACLE_CONCURRENCY",
    "SIEVE_QDRANT_URL",
    "SIEVE_PARENT_COLLECTION",
    "SIEVE_TOP_K_INITIAL",
    "SIEVE_TOP_K_FAST",
    "SIEVE_TOP_K_PRECISE",
    "SIEVE_MIN_RELEVANCE_SCORE",
    "SIEVE_USE_RERANK",
    "SIEVE_USE_PARENT_EXPANSION",
    "SIEVE_USE_CORRECTIVE_FILTER",
    "SIEVE_RERANKER_BATCH_SIZE",
];

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_sieve_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for key in SIEVE_VARS {
        unsafe { env::remove_var(key) };
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.reranker_path.is_none());
    assert_eq!(config.fast_reranker, FastRerankerBackend::Lexical);
    assert_eq!(config.oracle_model, "llama3.2:3b");
    assert_eq!(config.oracle_concurrency, 1);
    assert_eq!(config.qdrant_url, "http://localhost:6334");
    assert_eq!(config.parent_collection, "greenvalue_parent");
    assert_eq!(config.pipeline, PipelineConfig::default());
}

#[test]
fn test_default_pipeline() {
    let pipeline = PipelineConfig::default();

    assert_eq!(pipeline.top_k_initial, 10);
    assert_eq!(pipeline.top_k_fast, 10);
    assert_eq!(pipeline.top_k_precise, 3);
    assert_eq!(pipeline.min_relevance_score, 25);
    assert!(pipeline.use_rerank);
    assert!(pipeline.use_parent_expansion);
    assert!(pipeline.use_corrective_filter);
    assert!(pipeline.validate().is_ok());
}

#[test]
fn test_search_only_pipeline() {
    let pipeline = PipelineConfig::search_only();

    assert!(!pipeline.use_rerank);
    assert!(!pipeline.use_parent_expansion);
    assert!(!pipeline.use_corrective_filter);
    assert_eq!(pipeline.top_k_initial, 10);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_sieve_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert!(config.reranker_path.is_none());
    assert_eq!(config.fast_reranker, FastRerankerBackend::Lexical);
    assert_eq!(config.pipeline, PipelineConfig::default());
}

#[test]
#[serial]
fn test_full_config_parse() {
    clear_sieve_env();

    with_env_vars(
        &[
            ("SIEVE_RERANKER_PATH", "/models/ms-marco-minilm"),
            ("SIEVE_FAST_RERANKER", "off"),
            ("SIEVE_ORACLE_MODEL", "gpt-4o-mini"),
            ("SIEVE_ORACLE_CONCURRENCY", "4"),
            ("SIEVE_QDRANT_URL", "http://qdrant.cluster:6334"),
            ("SIEVE_PARENT_COLLECTION", "manuals_parent"),
            ("SIEVE_TOP_K_INITIAL", "40"),
            ("SIEVE_TOP_K_FAST", "12"),
            ("SIEVE_TOP_K_PRECISE", "5"),
            ("SIEVE_MIN_RELEVANCE_SCORE", "40"),
            ("SIEVE_USE_RERANK", "false"),
            ("SIEVE_USE_PARENT_EXPANSION", "0"),
            ("SIEVE_USE_CORRECTIVE_FILTER", "yes"),
        ],
        || {
            let config = Config::from_env().expect("should parse full config");

            assert_eq!(
                config.reranker_path,
                Some(PathBuf::from("/models/ms-marco-minilm"))
            );
            assert_eq!(config.fast_reranker, FastRerankerBackend::Disabled);
            assert_eq!(config.oracle_model, "gpt-4o-mini");
            assert_eq!(config.oracle_concurrency, 4);
            assert_eq!(config.qdrant_url, "http://qdrant.cluster:6334");
            assert_eq!(config.parent_collection, "manuals_parent");
            assert_eq!(
                config.pipeline,
                PipelineConfig {
                    top_k_initial: 40,
                    top_k_fast: 12,
                    top_k_precise: 5,
                    min_relevance_score: 40,
                    use_rerank: false,
                    use_parent_expansion: false,
                    use_corrective_filter: true,
                }
            );
        },
    );
}

#[test]
#[serial]
fn test_blank_reranker_path_is_unset() {
    clear_sieve_env();

    with_env_vars(&[("SIEVE_RERANKER_PATH", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.reranker_path.is_none());
    });
}

#[test]
#[serial]
fn test_invalid_top_k_not_number() {
    clear_sieve_env();

    with_env_vars(&[("SIEVE_TOP_K_PRECISE", "three")], || {
        let err = Config::from_env().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::NumberParseError {
                name: "SIEVE_TOP_K_PRECISE",
                ..
            }
        ));
        assert!(err.to_string().contains("three"));
    });
}

#[test]
#[serial]
fn test_invalid_bool() {
    clear_sieve_env();

    with_env_vars(&[("SIEVE_USE_RERANK", "maybe")], || {
        let err = PipelineConfig::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidBool { .. }));
        assert!(err.to_string().contains("SIEVE_USE_RERANK"));
    });
}

#[test]
#[serial]
fn test_bool_values_case_insensitive() {
    clear_sieve_env();

    with_env_vars(
        &[
            ("SIEVE_USE_RERANK", "OFF"),
            ("SIEVE_USE_CORRECTIVE_FILTER", " True "),
        ],
        || {
            let pipeline = PipelineConfig::from_env().expect("should parse");
            assert!(!pipeline.use_rerank);
            assert!(pipeline.use_corrective_filter);
        },
    );
}

#[test]
fn test_fast_reranker_backend_parse() {
    assert_eq!(FastRerankerBackend::parse("lexical"), FastRerankerBackend::Lexical);
    assert_eq!(FastRerankerBackend::parse(""), FastRerankerBackend::Lexical);
    assert_eq!(FastRerankerBackend::parse("OFF"), FastRerankerBackend::Disabled);
    assert_eq!(FastRerankerBackend::parse("none"), FastRerankerBackend::Disabled);
    assert_eq!(
        FastRerankerBackend::parse(" /models/tiny-ce "),
        FastRerankerBackend::CrossEncoder(PathBuf::from("/models/tiny-ce"))
    );
}

#[test]
fn test_validate_zero_width() {
    let pipeline = PipelineConfig {
        top_k_fast: 0,
        ..Default::default()
    };

    let err = pipeline.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ZeroWidth { field: "top_k_fast" }));
}

#[test]
fn test_validate_score_out_of_range() {
    let pipeline = PipelineConfig {
        min_relevance_score: 101,
        ..Default::default()
    };

    assert!(matches!(
        pipeline.validate(),
        Err(ConfigError::ScoreOutOfRange { value: 101 })
    ));
}

#[test]
fn test_validate_nonexistent_reranker_path() {
    let config = Config {
        reranker_path: Some(PathBuf::from("/nonexistent/path/to/reranker")),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_reranker_path_is_file() {
    let config = Config {
        reranker_path: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_fast_cross_encoder_path() {
    let config = Config {
        fast_reranker: FastRerankerBackend::CrossEncoder(PathBuf::from("/nonexistent/tiny-ce")),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_zero_concurrency() {
    let config = Config {
        oracle_concurrency: 0,
        ..Default::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::ZeroConcurrency)));
}

#[test]
fn test_validate_success_with_valid_paths() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let config = Config {
        reranker_path: Some(manifest_dir.join("src")),
        fast_reranker: FastRerankerBackend::CrossEncoder(manifest_dir.join("src")),
        ..Default::default()
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_precision_reranker_config() {
    let config = Config::default();
    assert!(config.precision_reranker_config().model_path.is_none());

    let config = Config {
        reranker_path: Some(PathBuf::from("/models/ce")),
        ..Default::default()
    };
    assert_eq!(
        config.precision_reranker_config().model_path,
        Some(PathBuf::from("/models/ce"))
    );
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::ZeroWidth {
        field: "top_k_initial",
    };
    assert!(err.to_string().contains("top_k_initial"));

    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/some/path"),
    };
    assert!(err.to_string().contains("/some/path"));

    let err = ConfigError::ScoreOutOfRange { value: 250 };
    assert!(err.to_string().contains("250"));
}
