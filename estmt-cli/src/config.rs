use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputSection,
    pub parse: ParseSection,
    pub batch: BatchSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Default directory for CSV files when `--out-dir` is not given
    pub dir: Option<PathBuf>,
    /// How many trailing account characters prefix each CSV file name
    pub account_suffix_len: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSection {
    /// Fail on a table with no Total row instead of dropping it
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSection {
    /// Continue with the next statement when one fails to parse
    pub keep_going: bool,
    /// File extension picked up by `--dir`
    pub extension: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: None,
            account_suffix_len: estmt_export::csv_writer::DEFAULT_ACCOUNT_SUFFIX_LEN,
        }
    }
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            keep_going: false,
            extension: "pdf".to_string(),
        }
    }
}

pub fn estmt_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".estmt"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(estmt_home()?.join("config.toml"))
}

/// Resolve `--config` or fall back to `~/.estmt/config.toml`.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&s).with_context(|| format!("in {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.output.account_suffix_len, 4);
        assert_eq!(cfg.batch.extension, "pdf");
        assert!(!cfg.parse.strict);
    }

    #[test]
    fn test_partial_config() {
        let cfg = parse_config(
            r#"
[output]
dir = "/home/me/statements/csv"

[parse]
strict = true
"#,
        )
        .unwrap();
        assert_eq!(cfg.output.dir, Some(PathBuf::from("/home/me/statements/csv")));
        assert_eq!(cfg.output.account_suffix_len, 4);
        assert!(cfg.parse.strict);
        assert!(!cfg.batch.keep_going);
    }

    #[test]
    fn test_bad_type_is_an_error() {
        assert!(parse_config("[parse]\nstrict = \"yes\"").is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".estmt").join("config.toml");
        let mut cfg = Config::default();
        cfg.batch.keep_going = true;
        cfg.output.dir = Some(PathBuf::from("csv"));

        save_config(&path, &cfg).unwrap();
        assert_eq!(load_config(&path).unwrap(), cfg);
    }

    #[test]
    fn test_missing_file_is_default() {
        let cfg = load_config(Path::new("/nonexistent/estmt/config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
