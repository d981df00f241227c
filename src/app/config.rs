use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ui::FALLBACK_WIDTH;

/// アプリケーション設定（~/.config/gradle-pretty/config.toml）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// ビルドログの保存先
    #[serde(default = "default_logfile")]
    pub logfile: PathBuf,
    /// ビルドログを保存しない
    #[serde(default)]
    pub no_logfile: bool,
    /// 警告を無視する
    #[serde(default)]
    pub no_warnings: bool,
    /// 端末幅を取得できない場合の幅
    #[serde(default = "default_fallback_width")]
    pub fallback_width: u16,
}

fn default_logfile() -> PathBuf {
    PathBuf::from("build.log")
}

fn default_fallback_width() -> u16 {
    FALLBACK_WIDTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logfile: default_logfile(),
            no_logfile: false,
            no_warnings: false,
            fallback_width: default_fallback_width(),
        }
    }
}

/// コマンドライン引数による上書き
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub logfile: Option<PathBuf>,
    pub no_logfile: bool,
    pub no_warnings: bool,
}

/// 設定ファイルと引数を統合した実行時設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// None when the mirror is disabled
    pub logfile: Option<PathBuf>,
    pub include_warnings: bool,
    pub fallback_width: u16,
}

impl Config {
    /// 設定ファイルから読み込み（存在しない場合はデフォルト）
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_or_default(&path),
            Err(e) => {
                tracing::debug!("No config directory, using defaults: {}", e);
                Ok(Self::default())
            }
        }
    }

    /// ファイルがあれば読み込み、なければデフォルト
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// 指定されたファイルから読み込み
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// 設定ファイルパスを取得
    pub fn config_path() -> Result<PathBuf> {
        let base_dirs = directories::BaseDirs::new()
            .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))?;
        Ok(base_dirs.home_dir().join(".config/gradle-pretty/config.toml"))
    }

    /// 引数で上書きした実行時設定を生成
    pub fn apply(&self, overrides: &ConfigOverrides) -> Settings {
        let no_logfile = self.no_logfile || overrides.no_logfile;
        let logfile = overrides
            .logfile
            .clone()
            .unwrap_or_else(|| self.logfile.clone());

        Settings {
            logfile: (!no_logfile).then_some(logfile),
            include_warnings: !(self.no_warnings || overrides.no_warnings),
            fallback_width: self.fallback_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Config::default().apply(&ConfigOverrides::default());
        assert_eq!(settings.logfile, Some(PathBuf::from("build.log")));
        assert!(settings.include_warnings);
        assert_eq!(settings.fallback_width, 80);
    }

    #[test]
    fn test_partial_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "no_warnings = true\nfallback_width = 120\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.logfile, PathBuf::from("build.log"));
        assert!(config.no_warnings);
        assert!(!config.no_logfile);
        assert_eq!(config.fallback_width, 120);
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fallback_width = \"wide\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let dir = tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_missing_default_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".config/gradle-pretty/config.toml");

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config, Config::default());
        // Nothing is written on first run
        assert!(!path.exists());
    }

    #[test]
    fn test_existing_default_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "logfile = \"gradle.log\"\n").unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.logfile, PathBuf::from("gradle.log"));
    }

    #[test]
    fn test_overrides() {
        let config = Config {
            logfile: PathBuf::from("from-config.log"),
            ..Default::default()
        };

        let settings = config.apply(&ConfigOverrides {
            logfile: Some(PathBuf::from("from-cli.log")),
            no_logfile: false,
            no_warnings: true,
        });
        assert_eq!(settings.logfile, Some(PathBuf::from("from-cli.log")));
        assert!(!settings.include_warnings);

        let settings = config.apply(&ConfigOverrides {
            no_logfile: true,
            ..Default::default()
        });
        assert_eq!(settings.logfile, None);
    }

    #[test]
    fn test_config_file_disables_logfile() {
        let config = Config {
            no_logfile: true,
            ..Default::default()
        };
        assert_eq!(config.apply(&ConfigOverrides::default()).logfile, None);
    }
}
