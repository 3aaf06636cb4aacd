use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment prefix for all overrides.
const ENV_PREFIX: &str = "QUEUEWATCH_";

/// Load configuration from file with environment variable overrides.
///
/// Nested keys use a double underscore, e.g. `QUEUEWATCH_BACKEND__BASE_URL`.
/// The flat `QUEUEWATCH_WAIT_TIME_MINS` and `QUEUEWATCH_REFRESH_INTERVAL`
/// variables are also honoured and land in the `[ticket]` section.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(flat_ticket_env())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn flat_ticket_env() -> Env {
    Env::prefixed(ENV_PREFIX)
        .only(&["wait_time_mins", "refresh_interval"])
        .map(|key| {
            if key.as_str().eq_ignore_ascii_case("wait_time_mins") {
                "ticket.wait_time_per_ticket_mins".into()
            } else {
                "ticket.refresh_interval_ms".into()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[backend]
base_url = "http://localhost:8888/.netlify/functions/ticket"

[ticket]
refresh_interval_ms = 2000
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.ticket.refresh_interval_ms, 2000);
        assert_eq!(config.ticket.wait_time_per_ticket_mins, 3);
    }

    #[test]
    fn test_load_config_from_str_missing_backend() {
        let toml = r#"
[ticket]
refresh_interval_ms = 5000
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/queuewatch.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    const BASE_TOML: &str = r#"
[backend]
base_url = "http://127.0.0.1:3000/ticket"
timeout_secs = 10

[session]
path = "/tmp/queuewatch-test-session.json"
landing_url = "https://queue.example.org/"
"#;

    #[test]
    fn test_load_config_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file("queuewatch.toml", BASE_TOML)?;

            let config = load_config(Path::new("queuewatch.toml")).unwrap();
            assert_eq!(config.backend.base_url, "http://127.0.0.1:3000/ticket");
            assert_eq!(config.backend.timeout_secs, Some(10));
            assert_eq!(config.session.landing_url, "https://queue.example.org/");
            assert_eq!(config.ticket.refresh_interval_ms, 5000);
            Ok(())
        });
    }

    #[test]
    fn test_flat_ticket_env_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file("queuewatch.toml", BASE_TOML)?;
            jail.set_env("QUEUEWATCH_WAIT_TIME_MINS", "7");
            jail.set_env("QUEUEWATCH_REFRESH_INTERVAL", "1234");

            let config = load_config(Path::new("queuewatch.toml")).unwrap();
            assert_eq!(config.ticket.wait_time_per_ticket_mins, 7);
            assert_eq!(config.ticket.refresh_interval_ms, 1234);
            assert_eq!(config.backend.base_url, "http://127.0.0.1:3000/ticket");
            Ok(())
        });
    }

    #[test]
    fn test_nested_env_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file("queuewatch.toml", BASE_TOML)?;
            jail.set_env("QUEUEWATCH_BACKEND__BASE_URL", "https://queue.example.org/ticket");
            jail.set_env("QUEUEWATCH_BACKEND__TIMEOUT_SECS", "30");
            jail.set_env("QUEUEWATCH_TICKET__REFRESH_INTERVAL_MS", "2500");

            let config = load_config(Path::new("queuewatch.toml")).unwrap();
            assert_eq!(config.backend.base_url, "https://queue.example.org/ticket");
            assert_eq!(config.backend.timeout_secs, Some(30));
            assert_eq!(config.ticket.refresh_interval_ms, 2500);
            assert_eq!(config.ticket.wait_time_per_ticket_mins, 3);
            Ok(())
        });
    }
}
