//! Loader configuration.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. the file named by `NBIND_CONFIG`, which must exist, or else an optional
//!    `nbind.toml` next to the executable
//! 3. `NBIND_*` environment variables (`NBIND_BINDING_NAME`, `NBIND_LOCAL_DIR`, ...)

use figment::Figment;
use figment::providers::{Data, Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

const ENV_PREFIX: &str = "NBIND_";
const CONFIG_FILE: &str = "nbind.toml";
const CONFIG_ENV: &str = "NBIND_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File stem of local artifacts: `<binding_name>.<target>.node`.
    pub binding_name: String,
    pub package_scope: String,
    /// Fallback packages are named `<package_scope>/<package_prefix>-<target>`.
    pub package_prefix: String,
    /// Directory holding local artifacts; the executable's directory if unset.
    pub local_dir: Option<PathBuf>,
    /// Searched for fallback packages before the `node_modules` ancestry.
    pub package_roots: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binding_name: "rust".to_string(),
            package_scope: "@user.tax".to_string(),
            package_prefix: "rust".to_string(),
            local_dir: None,
            package_roots: Vec::new(),
        }
    }
}

impl Config {
    /// Defaults, then the config file, then the environment.
    pub fn load() -> Result<Self> {
        let mut figment = Self::figment();
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => figment = figment.merge(required_toml(Path::new(&path))?),
            None => {
                if let Ok(dir) = exe_dir() {
                    figment = figment.merge(Toml::file(dir.join(CONFIG_FILE)));
                }
            }
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)).extract()?)
    }

    /// Defaults overlaid with a single TOML file. A missing file is ignored.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::figment()
            .merge(Toml::file(path.as_ref()))
            .extract()?)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    pub fn local_dir(&self) -> Result<PathBuf> {
        match &self.local_dir {
            Some(dir) => Ok(dir.clone()),
            None => exe_dir(),
        }
    }
}

/// A file the user named explicitly; unlike the default location it may not be absent.
fn required_toml(path: &Path) -> Result<Data<Toml>> {
    if !path.is_file() {
        let message = format!("config file {} does not exist", path.display());
        return Err(figment::Error::from(message).into());
    }
    Ok(Toml::file_exact(path))
}

fn exe_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(Error::LocalDir)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        Error::LocalDir(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "executable has no parent directory",
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.binding_name, "rust");
        assert_eq!(config.package_scope, "@user.tax");
        assert_eq!(config.package_prefix, "rust");
        assert!(config.package_roots.is_empty());
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::from_file(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
binding_name = "crypto"
package_roots = ["/opt/bindings"]
local_dir = "/srv/app"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.binding_name, "crypto");
        assert_eq!(config.package_scope, "@user.tax");
        assert_eq!(config.package_roots, vec![PathBuf::from("/opt/bindings")]);
        assert_eq!(config.local_dir().unwrap(), PathBuf::from("/srv/app"));
    }

    #[test]
    fn test_required_file_must_exist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let Err(err) = required_toml(&path) else {
            panic!("expected a missing file to be rejected");
        };
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("missing.toml"), "{err}");
    }

    #[test]
    fn test_required_file_is_merged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "package_prefix = \"native\"").unwrap();

        let config: Config = Config::figment()
            .merge(required_toml(&path).unwrap())
            .extract()
            .unwrap();
        assert_eq!(config.package_prefix, "native");
        assert_eq!(config.binding_name, "rust");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "binding_name = [1, 2]").unwrap();

        assert!(matches!(Config::from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_local_dir_defaults_to_exe_dir() {
        let dir = Config::default().local_dir().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(Some(dir.as_path()), exe.parent());
    }
}
