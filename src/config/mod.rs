// ABOUTME: Configuration types and parsing for kiln.yml.
// ABOUTME: Handles YAML parsing, token env overrides, and the init template.

use crate::error::{Error, Result};
use crate::power::IpmiConfig;
use crate::retry::RetryPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "kiln.yml";
pub const CONFIG_FILENAME_ALT: &str = "kiln.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".kiln/config.yml";

/// Environment overrides for the two FOG tokens, so credentials can stay
/// out of the config file.
pub const ENV_FOG_API_TOKEN: &str = "KILN_FOG_API_TOKEN";
pub const ENV_FOG_USER_TOKEN: &str = "KILN_FOG_USER_TOKEN";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub fog: FogConfig,

    /// IPMI credentials for power-cycling targets.
    pub ipmi: IpmiConfig,

    #[serde(default)]
    pub inventory: Option<InventoryConfig>,

    #[serde(default)]
    pub ssh: SshConfig,

    #[serde(default)]
    pub polling: PollingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FogConfig {
    /// Base URL of the FOG API, e.g. `https://fog.example.com/fog`.
    pub endpoint: String,

    #[serde(default)]
    pub api_token: String,

    #[serde(default)]
    pub user_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    /// Base URL of the inventory/lock server used to resolve machine types.
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SshConfig {
    #[serde(default = "default_ssh_user")]
    pub user: String,

    #[serde(default = "default_ssh_port")]
    pub port: u16,

    #[serde(default)]
    pub key_path: Option<PathBuf>,

    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            user: default_ssh_user(),
            port: default_ssh_port(),
            key_path: None,
            connect_timeout: default_connect_timeout(),
        }
    }
}

fn default_ssh_user() -> String {
    "ubuntu".to_string()
}

fn default_ssh_port() -> u16 {
    22
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(60)
}

/// The two wait budgets plus the correlation window.
///
/// Imaging takes minutes, so the deploy wait sleeps long and tries often;
/// booting after imaging is quick, so the reachability wait is tighter.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_correlation_window", with = "humantime_serde")]
    pub correlation_window: Duration,

    #[serde(default = "default_deploy_wait")]
    pub deploy_wait: RetryPolicy,

    #[serde(default = "default_reachable_wait")]
    pub reachable_wait: RetryPolicy,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            correlation_window: default_correlation_window(),
            deploy_wait: default_deploy_wait(),
            reachable_wait: default_reachable_wait(),
        }
    }
}

fn default_correlation_window() -> Duration {
    Duration::from_secs(5)
}

fn default_deploy_wait() -> RetryPolicy {
    RetryPolicy::new(Duration::from_secs(15), 40)
}

fn default_reachable_wait() -> RetryPolicy {
    RetryPolicy::new(Duration::from_secs(6), 20)
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(ENV_FOG_API_TOKEN) {
            self.fog.api_token = token;
        }
        if let Ok(token) = std::env::var(ENV_FOG_USER_TOKEN) {
            self.fog.user_token = token;
        }
    }
}

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    std::fs::write(&config_path, template_yaml())?;
    Ok(())
}

fn template_yaml() -> &'static str {
    r#"fog:
  endpoint: https://fog.example.com/fog
  # Tokens may also come from KILN_FOG_API_TOKEN / KILN_FOG_USER_TOKEN.
  api_token: ""
  user_token: ""

ipmi:
  domain: ipmi.example.com
  user: admin
  password: changeme

# Optional: lock server used to resolve machine types when --machine-type
# is not given on the command line.
# inventory:
#   endpoint: https://inventory.example.com

ssh:
  user: ubuntu

polling:
  correlation_window: 5s
  deploy_wait:
    sleep_interval: 15s
    max_attempts: 40
  reachable_wait:
    sleep_interval: 6s
    max_attempts: 20
"#
}
