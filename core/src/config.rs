use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use eda_copilot_api_client::BUILT_IN_GEMINI_PROVIDER_ID;
use eda_copilot_api_client::ModelProviderInfo;
use eda_copilot_api_client::built_in_model_providers;
use serde::Deserialize;
use tracing::debug;

use crate::error::CopilotErr;
use crate::error::Result;

pub const CONFIG_TOML_FILE: &str = "config.toml";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const HOME_ENV_VAR: &str = "EDA_COPILOT_HOME";
const DEFAULT_HOME_DIR: &str = ".eda-copilot";

/// Contents of `config.toml`. Every key is optional.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigToml {
    /// Model name sent to the provider.
    pub model: Option<String>,

    /// Key into `model_providers` selecting the provider to use.
    pub model_provider: Option<String>,

    /// User-defined providers. Built-in ids cannot be redefined.
    #[serde(default)]
    pub model_providers: HashMap<String, ModelProviderInfo>,
}

/// Values supplied on the command line that take precedence over
/// `config.toml`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub model_provider: Option<String>,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub model: String,

    pub model_provider_id: String,

    /// Provider selected by `model_provider_id`.
    pub model_provider: ModelProviderInfo,

    /// Built-in providers merged with those from `config.toml`.
    pub model_providers: HashMap<String, ModelProviderInfo>,

    /// Directory holding `config.toml` and `history.json` (defaults to
    /// `~/.eda-copilot`, overridable with `EDA_COPILOT_HOME`).
    pub eda_copilot_home: PathBuf,
}

impl Config {
    /// Read `config.toml` from `eda_copilot_home` and apply `overrides`.
    pub async fn load_with_overrides(
        eda_copilot_home: PathBuf,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let cfg = load_config_as_toml(&eda_copilot_home).await?;
        Self::load_from_base_config_with_overrides(cfg, overrides, eda_copilot_home)
    }

    pub fn load_from_base_config_with_overrides(
        cfg: ConfigToml,
        overrides: ConfigOverrides,
        eda_copilot_home: PathBuf,
    ) -> Result<Self> {
        let ConfigOverrides {
            model,
            model_provider,
        } = overrides;

        let mut model_providers = built_in_model_providers();
        for (key, provider) in cfg.model_providers {
            model_providers.entry(key).or_insert(provider);
        }

        let model_provider_id = model_provider
            .or(cfg.model_provider)
            .unwrap_or_else(|| BUILT_IN_GEMINI_PROVIDER_ID.to_string());
        let model_provider = model_providers
            .get(&model_provider_id)
            .ok_or_else(|| {
                CopilotErr::Config(format!("model provider `{model_provider_id}` not found"))
            })?
            .clone();

        let model = model
            .or(cfg.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            model,
            model_provider_id,
            model_provider,
            model_providers,
            eda_copilot_home,
        })
    }
}

/// Parse `config.toml` under `eda_copilot_home`. A missing file is an empty
/// config.
pub async fn load_config_as_toml(eda_copilot_home: &Path) -> Result<ConfigToml> {
    let path = eda_copilot_home.join(CONFIG_TOML_FILE);
    match tokio::fs::read_to_string(&path).await {
        Ok(contents) => toml::from_str(&contents)
            .map_err(|err| CopilotErr::Config(format!("{}: {err}", path.display()))),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("{} not found, using defaults", path.display());
            Ok(ConfigToml::default())
        }
        Err(err) => Err(err.into()),
    }
}

/// Returns the application home directory.
///
/// `$EDA_COPILOT_HOME` wins when set and non-empty; otherwise
/// `~/.eda-copilot`. The directory does not have to exist yet.
pub fn find_eda_copilot_home() -> std::io::Result<PathBuf> {
    if let Ok(val) = std::env::var(HOME_ENV_VAR)
        && !val.trim().is_empty()
    {
        return Ok(PathBuf::from(val));
    }

    let mut home = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(ErrorKind::NotFound, "could not find home directory")
    })?;
    home.push(DEFAULT_HOME_DIR);
    Ok(home)
}
