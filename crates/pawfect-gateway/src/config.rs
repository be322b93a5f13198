//! Gateway configuration and factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use pawfect_core::traits::{Identity, IdentityProvider, PersistenceGateway};

use crate::auth::RestAuth;
use crate::local::{LocalGateway, LocalIdentity};
use crate::rest::RestGateway;

/// Where evaluations are saved.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GatewayConfig {
    Rest {
        url: String,
        api_key: String,
    },
    /// Rows are appended to JSON-lines files under `dir`.
    Local {
        #[serde(default = "default_saved_dir")]
        dir: PathBuf,
    },
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig::Local {
            dir: default_saved_dir(),
        }
    }
}

fn default_saved_dir() -> PathBuf {
    PathBuf::from(".pawfect").join("saved")
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayConfig::Rest { url, api_key: _ } => f
                .debug_struct("Rest")
                .field("url", url)
                .field("api_key", &"***")
                .finish(),
            GatewayConfig::Local { dir } => f.debug_struct("Local").field("dir", dir).finish(),
        }
    }
}

/// Top-level pawfect configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PawfectConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Default evaluator name for saves.
    #[serde(default)]
    pub evaluator_name: Option<String>,
    /// Directory exports and reports are written to.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for PawfectConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            evaluator_name: None,
            export_dir: default_export_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_gateway_config(config: &GatewayConfig) -> GatewayConfig {
    match config {
        GatewayConfig::Rest { url, api_key } => GatewayConfig::Rest {
            url: resolve_env_vars(url),
            api_key: resolve_env_vars(api_key),
        },
        GatewayConfig::Local { dir } => GatewayConfig::Local {
            dir: PathBuf::from(resolve_env_vars(&dir.to_string_lossy())),
        },
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `pawfect.toml` in the current directory
/// 2. `~/.config/pawfect/config.toml`
///
/// Environment variable overrides: `PAWFECT_BACKEND_URL`, `PAWFECT_BACKEND_KEY`.
pub fn load_config_from(path: Option<&Path>) -> Result<PawfectConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("pawfect.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PawfectConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PawfectConfig::default(),
    };

    apply_env_overrides(
        &mut config,
        std::env::var("PAWFECT_BACKEND_URL").ok(),
        std::env::var("PAWFECT_BACKEND_KEY").ok(),
    );
    config.gateway = resolve_gateway_config(&config.gateway);

    tracing::debug!(gateway = ?config.gateway, "configuration loaded");
    Ok(config)
}

/// A backend URL switches the gateway to REST; a key replaces the REST key.
fn apply_env_overrides(config: &mut PawfectConfig, url: Option<String>, key: Option<String>) {
    if let Some(url) = url {
        match &mut config.gateway {
            GatewayConfig::Rest { url: current, .. } => *current = url,
            GatewayConfig::Local { .. } => {
                config.gateway = GatewayConfig::Rest {
                    url,
                    api_key: String::new(),
                }
            }
        }
    }
    if let (Some(key), GatewayConfig::Rest { api_key, .. }) = (key, &mut config.gateway) {
        *api_key = key;
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("pawfect"))
}

/// Create the persistence gateway, authenticated as `identity` when given.
pub fn create_gateway(
    config: &GatewayConfig,
    identity: Option<&Identity>,
) -> Result<Arc<dyn PersistenceGateway>> {
    match config {
        GatewayConfig::Rest { url, api_key } => {
            if url.is_empty() {
                anyhow::bail!("rest gateway requires a url (set PAWFECT_BACKEND_URL)");
            }
            let token = identity.and_then(|i| i.access_token.clone());
            Ok(Arc::new(
                RestGateway::new(url, api_key).with_access_token(token),
            ))
        }
        GatewayConfig::Local { dir } => Ok(Arc::new(LocalGateway::new(dir))),
    }
}

/// Create the identity provider matching the gateway.
pub fn create_identity_provider(config: &GatewayConfig) -> Result<Box<dyn IdentityProvider>> {
    match config {
        GatewayConfig::Rest { url, api_key } => {
            if url.is_empty() {
                anyhow::bail!("rest gateway requires a url (set PAWFECT_BACKEND_URL)");
            }
            Ok(Box::new(RestAuth::new(url, api_key)))
        }
        GatewayConfig::Local { dir } => Ok(Box::new(LocalIdentity::new(dir))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_PAWFECT_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_PAWFECT_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_PAWFECT_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no_close_${"), "no_close_${");
        std::env::remove_var("_PAWFECT_TEST_VAR");
    }

    #[test]
    fn default_config_saves_locally() {
        let config = PawfectConfig::default();
        match &config.gateway {
            GatewayConfig::Local { dir } => assert_eq!(dir, &PathBuf::from(".pawfect/saved")),
            other => panic!("unexpected gateway: {other:?}"),
        }
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!(config.evaluator_name.is_none());
    }

    #[test]
    fn parse_rest_config() {
        let toml_str = r#"
evaluator_name = "Ana"
export_dir = "out"

[gateway]
type = "rest"
url = "https://abc.example.co"
api_key = "anon-key"
"#;
        let config: PawfectConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.evaluator_name.as_deref(), Some("Ana"));
        assert_eq!(config.export_dir, PathBuf::from("out"));
        match &config.gateway {
            GatewayConfig::Rest { url, api_key } => {
                assert_eq!(url, "https://abc.example.co");
                assert_eq!(api_key, "anon-key");
            }
            other => panic!("unexpected gateway: {other:?}"),
        }
    }

    #[test]
    fn debug_masks_api_key() {
        let config = GatewayConfig::Rest {
            url: "https://abc.example.co".into(),
            api_key: "super-secret".into(),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("abc.example.co"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn env_url_switches_local_to_rest() {
        let mut config = PawfectConfig::default();
        apply_env_overrides(
            &mut config,
            Some("https://env.example.co".into()),
            Some("env-key".into()),
        );
        match &config.gateway {
            GatewayConfig::Rest { url, api_key } => {
                assert_eq!(url, "https://env.example.co");
                assert_eq!(api_key, "env-key");
            }
            other => panic!("unexpected gateway: {other:?}"),
        }
    }

    #[test]
    fn env_key_alone_keeps_local_gateway() {
        let mut config = PawfectConfig::default();
        apply_env_overrides(&mut config, None, Some("env-key".into()));
        assert!(matches!(config.gateway, GatewayConfig::Local { .. }));
    }

    #[test]
    fn parse_local_config() {
        let with_dir: PawfectConfig =
            toml::from_str("[gateway]\ntype = \"local\"\ndir = \"records\"\n").unwrap();
        match &with_dir.gateway {
            GatewayConfig::Local { dir } => assert_eq!(dir, &PathBuf::from("records")),
            other => panic!("unexpected gateway: {other:?}"),
        }

        let without_dir: PawfectConfig = toml::from_str("[gateway]\ntype = \"local\"\n").unwrap();
        assert!(matches!(
            without_dir.gateway,
            GatewayConfig::Local { ref dir } if dir == &PathBuf::from(".pawfect/saved")
        ));

        assert!(toml::from_str::<PawfectConfig>("[gateway]\ntype = \"memory\"\n").is_err());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pawfect.toml");
        std::fs::write(&path, "evaluator_name = \"Bo\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.evaluator_name.as_deref(), Some("Bo"));
    }

    #[test]
    fn rest_without_url_cannot_be_created() {
        let config = GatewayConfig::Rest {
            url: String::new(),
            api_key: "k".into(),
        };
        assert!(create_gateway(&config, None).is_err());
        assert!(create_identity_provider(&config).is_err());
        assert_eq!(
            create_gateway(&GatewayConfig::default(), None)
                .unwrap()
                .name(),
            "local"
        );
    }
}
