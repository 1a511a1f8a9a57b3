//! Integration tests for configuration loading and validation

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::errors::SummaryError;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    #[serial]
    fn test_empty_config_uses_defaults() {
        let config = ConfigLoader::from_str("").unwrap();

        assert_eq!(config.llm.provider, LlmProvider::OpenAI);
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.chunking.max_total_chars, 9000);
        assert_eq!(config.chunking.max_chars_per_chunk, 4000);
        assert_eq!(config.chunking.summary_target_chars, 1000);
        assert_eq!(config.chunking.min_chars_per_chunk, 1000);
        assert_eq!(config.chunking.shrink_factor, 0.8);
    }

    #[test]
    #[serial]
    fn test_partial_yaml_overrides() {
        let yaml = r#"
llm:
  model: gpt-4.1-mini
  parameters:
    temperature: 0.2
chunking:
  max_chars_per_chunk: 2500
"#;
        let config = ConfigLoader::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gpt-4.1-mini");
        assert_eq!(config.llm.parameters.temperature, 0.2);
        assert_eq!(config.llm.parameters.timeout_secs, 120);
        assert_eq!(config.chunking.max_chars_per_chunk, 2500);
        assert_eq!(config.chunking.max_total_chars, 9000);

        let plan = config.chunking.plan();
        assert_eq!(plan.max_chars_per_chunk, 2500);
        assert_eq!(plan.summary_target_chars, 1000);
    }

    #[test]
    #[serial]
    fn test_custom_provider_parsing() {
        let yaml = r#"
llm:
  provider:
    custom:
      base_url: http://localhost:8080/v1
  model: local-model
"#;
        let config = ConfigLoader::from_str(yaml).unwrap();
        assert_eq!(
            config.llm.provider,
            LlmProvider::Custom {
                base_url: "http://localhost:8080/v1".to_string()
            }
        );
    }

    #[test]
    #[serial]
    fn test_zero_chunk_size_is_rejected() {
        let yaml = "chunking:\n  max_chars_per_chunk: 0\n";
        let err = ConfigLoader::from_str(yaml).unwrap_err();
        assert!(matches!(err, SummaryError::ConfigError(ref msg) if msg.contains("max_chars_per_chunk")));
    }

    #[test]
    #[serial]
    fn test_invalid_values_are_rejected() {
        assert!(ConfigLoader::from_str("llm:\n  parameters:\n    temperature: 3.5\n").is_err());
        assert!(ConfigLoader::from_str("llm:\n  model: \"  \"\n").is_err());
        assert!(ConfigLoader::from_str("chunking:\n  shrink_factor: 1.0\n").is_err());
        assert!(ConfigLoader::from_str("chunking:\n  min_chars_per_chunk: 0\n").is_err());
        assert!(ConfigLoader::from_str("llm: [not, a, map]").is_err());
    }

    #[test]
    #[serial]
    fn test_api_key_resolution_order() {
        std::env::set_var("CHUNKWISE_TEST_KEY", "from-custom-env");
        std::env::set_var("OPENAI_API_KEY", "from-openai-env");

        let mut explicit = LlmAuth {
            api_key: Some("explicit".to_string()),
            api_key_env: Some("CHUNKWISE_TEST_KEY".to_string()),
        };
        ConfigLoader::resolve_llm_auth(&mut explicit);
        assert_eq!(explicit.api_key.as_deref(), Some("explicit"));

        let mut named = LlmAuth {
            api_key: None,
            api_key_env: Some("CHUNKWISE_TEST_KEY".to_string()),
        };
        ConfigLoader::resolve_llm_auth(&mut named);
        assert_eq!(named.api_key.as_deref(), Some("from-custom-env"));

        let mut fallback = LlmAuth::default();
        ConfigLoader::resolve_llm_auth(&mut fallback);
        assert_eq!(fallback.api_key.as_deref(), Some("from-openai-env"));

        std::env::remove_var("CHUNKWISE_TEST_KEY");
        std::env::remove_var("OPENAI_API_KEY");

        let mut missing = LlmAuth::default();
        ConfigLoader::resolve_llm_auth(&mut missing);
        assert!(missing.api_key.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "llm:\n  auth:\n    api_key: sk-file\nchunking:\n  max_total_chars: 12000\n"
        )
        .unwrap();

        let config = load_config(file.path()).await.unwrap();
        assert_eq!(config.llm.auth.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.chunking.max_total_chars, 12000);
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunkwise.yaml");

        assert!(load_config(&path).await.is_err());

        let config = ConfigLoader::from_file_or_default(&path).await.unwrap();
        assert_eq!(config.chunking, ChunkingConfig::default());
        assert!(validate_config(&config).is_ok());
    }
}
