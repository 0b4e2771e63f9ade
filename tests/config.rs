// ABOUTME: Integration tests for configuration parsing and discovery.
// ABOUTME: Tests YAML parsing, defaults, and token env overrides.

use kiln::config::{Config, ENV_FOG_API_TOKEN, ENV_FOG_USER_TOKEN};
use kiln::error::Error;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let yaml = r#"
fog:
  endpoint: https://fog.example.com/fog
  api_token: abc
  user_token: def
ipmi:
  domain: ipmi.example.com
  user: admin
  password: secret
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.fog.endpoint, "https://fog.example.com/fog");
        assert_eq!(config.ipmi.domain, "ipmi.example.com");
        assert!(config.inventory.is_none());
    }

    #[test]
    fn defaults_apply_when_sections_are_omitted() {
        let yaml = r#"
fog:
  endpoint: https://fog.example.com/fog
ipmi:
  domain: ipmi.example.com
  user: admin
  password: secret
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.ssh.user, "ubuntu");
        assert_eq!(config.ssh.port, 22);
        assert_eq!(config.polling.correlation_window, Duration::from_secs(5));
        assert_eq!(
            config.polling.deploy_wait.sleep_interval,
            Duration::from_secs(15)
        );
        assert_eq!(config.polling.deploy_wait.max_attempts, 40);
        assert_eq!(
            config.polling.reachable_wait.sleep_interval,
            Duration::from_secs(6)
        );
        assert_eq!(config.polling.reachable_wait.max_attempts, 20);
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
fog:
  endpoint: https://fog.example.com/fog
  api_token: abc
  user_token: def

ipmi:
  domain: ipmi.example.com
  user: admin
  password: secret

inventory:
  endpoint: https://inventory.example.com

ssh:
  user: deploy
  port: 2222
  key_path: /home/deploy/.ssh/id_ed25519
  connect_timeout: 30s

polling:
  correlation_window: 10s
  deploy_wait:
    sleep_interval: 20s
    max_attempts: 60
  reachable_wait:
    sleep_interval: 3s
    max_attempts: 10
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(
            config.inventory.unwrap().endpoint,
            "https://inventory.example.com"
        );
        assert_eq!(config.ssh.user, "deploy");
        assert_eq!(config.ssh.port, 2222);
        assert_eq!(config.ssh.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.polling.correlation_window, Duration::from_secs(10));
        assert_eq!(config.polling.deploy_wait.max_attempts, 60);
        assert_eq!(
            config.polling.reachable_wait.sleep_interval,
            Duration::from_secs(3)
        );
    }

    #[test]
    fn missing_fog_section_is_an_error() {
        let yaml = r#"
ipmi:
  domain: ipmi.example.com
  user: admin
  password: secret
"#;
        assert!(matches!(Config::from_yaml(yaml), Err(Error::Yaml(_))));
    }
}

mod env_overrides {
    use super::*;

    const YAML: &str = r#"
fog:
  endpoint: https://fog.example.com/fog
  api_token: from-file
  user_token: from-file
ipmi:
  domain: ipmi.example.com
  user: admin
  password: secret
"#;

    #[test]
    fn tokens_come_from_env_when_set() {
        temp_env::with_vars(
            [
                (ENV_FOG_API_TOKEN, Some("api-from-env")),
                (ENV_FOG_USER_TOKEN, Some("user-from-env")),
            ],
            || {
                let config = Config::from_yaml(YAML).unwrap();
                assert_eq!(config.fog.api_token, "api-from-env");
                assert_eq!(config.fog.user_token, "user-from-env");
            },
        );
    }

    #[test]
    fn file_tokens_survive_without_env() {
        temp_env::with_vars(
            [
                (ENV_FOG_API_TOKEN, None::<&str>),
                (ENV_FOG_USER_TOKEN, None::<&str>),
            ],
            || {
                let config = Config::from_yaml(YAML).unwrap();
                assert_eq!(config.fog.api_token, "from-file");
                assert_eq!(config.fog.user_token, "from-file");
            },
        );
    }
}

mod discovery {
    use super::*;

    const YAML: &str = r#"
fog:
  endpoint: https://fog.example.com/fog
ipmi:
  domain: ipmi.example.com
  user: admin
  password: secret
"#;

    #[test]
    fn discovers_kiln_yml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("kiln.yml"), YAML).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.fog.endpoint, "https://fog.example.com/fog");
    }

    #[test]
    fn discovers_dotdir_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".kiln")).unwrap();
        std::fs::write(dir.path().join(".kiln/config.yml"), YAML).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.ipmi.user, "admin");
    }

    #[test]
    fn missing_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::discover(dir.path()),
            Err(Error::ConfigNotFound(_))
        ));
    }
}
