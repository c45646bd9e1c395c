//! Configuration loading tests

#[cfg(test)]
mod tests {
    use paygent::config::Config;
    use paygent::core::payments::PaymentsEnvironment;
    use paygent::core::providers::ProviderKind;
    use std::collections::HashMap;
    use std::io::Write;

    const YAML: &str = r#"
server:
  host: 127.0.0.1
  port: 8088
  timeout: 45
  cors:
    allowed_origins:
      - https://app.example.com
providers:
  default_provider: anthropic
  max_steps: 3
  anthropic:
    base_url: https://llm.internal/v1
    model: claude-3-5-sonnet-latest
payments:
  sandbox_base_url: https://sandbox.payments.internal
oauth:
  client_id: client
  client_secret: secret
  token_endpoint: https://auth.example.com/oauth/token
"#;

    #[tokio::test]
    async fn test_load_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server.address(), "127.0.0.1:8088");
        assert_eq!(config.server.timeout, 45);
        assert_eq!(config.providers.default_provider, ProviderKind::Anthropic);
        assert_eq!(config.providers.max_steps, 3);
        assert_eq!(config.providers.anthropic.model, "claude-3-5-sonnet-latest");
        assert_eq!(
            config.payments.base_url(PaymentsEnvironment::Sandbox),
            "https://sandbox.payments.internal"
        );
        assert!(config.oauth.is_configured());
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.yaml")).await.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.providers.max_steps, 5);
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"server:\n  port: 0\n").unwrap();
        assert!(Config::from_file(file.path()).await.is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"providers:\n  max_steps: 0\n").unwrap();
        assert!(Config::from_file(file.path()).await.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PAYGENT_PORT", "9000"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1"),
            ("PAYMAN_API_SECRET", "pm-secret"),
            ("PAYMAN_TOKEN_ENDPOINT", "https://auth.example.com/token"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.providers.openai.base_url, "http://localhost:8080/v1");
        assert_eq!(config.payments.api_secret.as_deref(), Some("pm-secret"));
        assert_eq!(
            config.oauth.token_endpoint.as_deref(),
            Some("https://auth.example.com/token")
        );

        let bad: HashMap<&str, &str> = [("PAYGENT_PORT", "not-a-port")].into_iter().collect();
        assert!(
            Config::default()
                .apply_overrides(|key| bad.get(key).map(|v| v.to_string()))
                .is_err()
        );
    }
}
