use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::llm::models::provider_handle::Endpoint;

pub const CONFIG_DIR_NAME: &str = ".plancraft";
pub const CONFIG_FILE_NAME: &str = "plancraft.json";
pub const PROJECT_BASE_ENV: &str = "PROJECT_BASE";

/// A named LLM endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub name: String,

    /// Full request URL; the provider is derived from its host
    pub api_url: String,

    /// Sent as a bearer token when non-empty
    #[serde(default)]
    pub api_key: String,

    /// Model name; provider default when absent
    #[serde(default)]
    pub model: Option<String>,
}

impl EndpointConfig {
    pub fn to_endpoint(&self) -> Endpoint {
        Endpoint::new(self.api_url.clone(), self.api_key.clone(), self.model.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Whole-request timeout in seconds, 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TransportConfig {
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectsConfig {
    #[serde(default)]
    pub base_path: Option<String>,
    #[serde(default = "default_subdirs")]
    pub subdirs: Vec<String>,
}

fn default_subdirs() -> Vec<String> {
    ["docs", "src", "tests", "tickets", "logs"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            subdirs: default_subdirs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// User override configuration (restricted fields)
#[derive(Debug, Default, Deserialize)]
pub struct UserOverrideConfig {
    pub endpoints: Option<Vec<EndpointConfig>>,
    pub default_endpoint: Option<String>,
    pub transport: Option<TransportConfig>,
    pub projects: Option<ProjectsConfig>,
}

/// Global application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,

    /// Name of the endpoint used when none is given
    #[serde(default)]
    pub default_endpoint: Option<String>,

    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub projects: ProjectsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration with layered strategy:
    /// 1. Defaults (Embedded Config.toml)
    /// 2. User Config (~/.plancraft/plancraft.json)
    /// 3. Project Config (./.plancraft/plancraft.json)
    /// 4. Environment (PROJECT_BASE)
    pub fn load() -> Result<Self> {
        let mut config = Self::embedded()?;

        if let Some(home) = dirs::home_dir() {
            let user_path = home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
            Self::apply_patch(&mut config, user_path);
        }

        let project_path = Path::new(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        Self::apply_patch(&mut config, project_path);

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(include_str!("../Config.toml"))
            .context("Failed to parse embedded Config.toml")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    pub(crate) fn apply_patch<P: AsRef<Path>>(config: &mut AppConfig, path: P) {
        let path = path.as_ref();
        if !path.exists() {
            return;
        }
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read config patch at {}: {}", path.display(), e);
                return;
            }
        };
        match serde_json::from_str::<UserOverrideConfig>(&content) {
            Ok(patch) => config.merge_patch(patch),
            Err(e) => {
                log::warn!("Failed to parse config patch at {}: {}", path.display(), e);
            }
        }
    }

    /// Endpoints in the patch replace same-named ones in place; new names are
    /// appended in patch order.
    pub fn merge_patch(&mut self, patch: UserOverrideConfig) {
        if let Some(endpoints) = patch.endpoints {
            for ep in endpoints {
                if ep.name.trim().is_empty() || ep.api_url.trim().is_empty() {
                    continue;
                }
                match self.endpoints.iter_mut().find(|e| e.name == ep.name) {
                    Some(existing) => *existing = ep,
                    None => self.endpoints.push(ep),
                }
            }
        }
        if let Some(name) = patch.default_endpoint {
            self.default_endpoint = Some(name);
        }
        if let Some(transport) = patch.transport {
            self.transport = transport;
        }
        if let Some(projects) = patch.projects {
            self.projects = projects;
        }
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(PROJECT_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.projects.base_path = Some(base);
        }
    }

    /// Resolves `name`, else the configured default, else the first endpoint.
    pub fn endpoint(&self, name: Option<&str>) -> Result<Endpoint> {
        let wanted = name
            .map(str::to_string)
            .or_else(|| self.default_endpoint.clone());

        let found = match wanted {
            Some(n) => self
                .endpoints
                .iter()
                .find(|e| e.name == n)
                .with_context(|| format!("Endpoint not configured: {}", n))?,
            None => self
                .endpoints
                .first()
                .context("No endpoints configured")?,
        };
        Ok(found.to_endpoint())
    }

    /// Directory new projects are created under.
    pub fn project_base(&self) -> PathBuf {
        match &self.projects.base_path {
            Some(p) if !p.trim().is_empty() => PathBuf::from(p),
            _ => std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("projects"),
        }
    }
}
