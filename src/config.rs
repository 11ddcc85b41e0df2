//! Configuration discovery and effective settings resolution.
//!
//! Catalint reads `catalint.toml|yaml|yml` from the working directory (or
//! closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `output`: `human`
//! - `network.offline`: false
//! - `network.timeout_secs`: 10
//! - `report.dir`: `reports`
//! - `report.write`: false
//! - `columns.{trader_price,dealer_price}`: the standard export headers
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::models::row::ColumnMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Network-related configuration section under `[network]`.
pub struct NetworkCfg {
    pub offline: Option<bool>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Report persistence configuration section under `[report]`.
pub struct ReportCfg {
    pub dir: Option<String>,
    pub write: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Metafield header overrides under `[columns]`.
pub struct ColumnsCfg {
    pub trader_price: Option<String>,
    pub dealer_price: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `catalint.toml|yaml`.
pub struct CatalintConfig {
    pub input: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub network: Option<NetworkCfg>,
    #[serde(default)]
    pub report: Option<ReportCfg>,
    #[serde(default)]
    pub columns: Option<ColumnsCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub input: Option<PathBuf>,
    pub output: String,
    pub offline: bool,
    pub timeout_secs: u64,
    pub report_dir: PathBuf,
    pub write_report: bool,
    pub columns: ColumnMap,
}

/// Walk upward from `start` to detect the working root.
///
/// Stops when a `catalint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("catalint.toml").exists()
            || cur.join("catalint.yaml").exists()
            || cur.join("catalint.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `CatalintConfig` from `catalint.toml` or `catalint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<CatalintConfig> {
    let toml_path = root.join("catalint.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: CatalintConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["catalint.yaml", "catalint.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: CatalintConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_input: Option<&str>,
    cli_output: Option<&str>,
    cli_offline: Option<bool>,
    cli_timeout_secs: Option<u64>,
    cli_report_dir: Option<&str>,
    cli_write_report: Option<bool>,
) -> Effective {
    let start = PathBuf::from(cli_root.unwrap_or("."));
    let root = detect_root(&start);
    let cfg = load_config(&root).unwrap_or_default();

    // CLI paths are taken as given; config paths resolve against the root.
    let input = cli_input
        .map(PathBuf::from)
        .or_else(|| cfg.input.as_ref().map(|p| root.join(p)));

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let offline = cli_offline
        .or_else(|| cfg.network.as_ref().and_then(|n| n.offline))
        .unwrap_or(false);
    let timeout_secs = cli_timeout_secs
        .or_else(|| cfg.network.as_ref().and_then(|n| n.timeout_secs))
        .unwrap_or(10);

    let report_dir = cli_report_dir
        .map(PathBuf::from)
        .or_else(|| cfg.report.as_ref().and_then(|r| r.dir.as_ref()).map(|d| root.join(d)))
        .unwrap_or_else(|| root.join("reports"));
    let write_report = cli_write_report
        .or_else(|| cfg.report.as_ref().and_then(|r| r.write))
        .unwrap_or(false);

    let mut columns = ColumnMap::default();
    if let Some(cols) = cfg.columns {
        if let Some(trader) = cols.trader_price {
            columns.trader_price = trader;
        }
        if let Some(dealer) = cols.dealer_price {
            columns.dealer_price = dealer;
        }
    }

    Effective {
        root,
        input,
        output,
        offline,
        timeout_secs,
        report_dir,
        write_report,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("catalint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
input = "exports/catalog.csv"
output = "json"
[network]
offline = true
timeout_secs = 3
    "#
        )
        .unwrap();

        // Resolve using explicit root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), None, None, None, None, None, None);
        assert_eq!(eff.input, Some(root.join("exports/catalog.csv")));
        assert_eq!(eff.output, "json");
        assert!(eff.offline);
        assert_eq!(eff.timeout_secs, 3);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("catalint.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
input: catalog.csv
report:
  dir: out
  write: true
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None, None, None, None);
        assert_eq!(eff.input, Some(root.join("catalog.csv")));
        assert_eq!(eff.output, "human");
        assert!(!eff.offline);
        assert_eq!(eff.timeout_secs, 10);
        assert_eq!(eff.report_dir, root.join("out"));
        assert!(eff.write_report);
    }

    #[test]
    fn test_cli_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("catalint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
input = "catalog.csv"
output = "json"
[network]
offline = true
[report]
write = true
            "#
        )
        .unwrap();

        let eff = resolve_effective(
            root.to_str(),
            Some("other.csv"),
            Some("human"),
            Some(false),
            Some(30),
            None,
            Some(false),
        );
        assert_eq!(eff.input, Some(PathBuf::from("other.csv")));
        assert_eq!(eff.output, "human");
        assert!(!eff.offline);
        assert_eq!(eff.timeout_secs, 30);
        assert!(!eff.write_report);
    }

    #[test]
    fn test_column_overrides_loaded() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("catalint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
[columns]
trader_price = "Trader Price"
dealer_price = "Dealer Price"
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None, None, None, None);
        assert_eq!(eff.columns.trader_price, "Trader Price");
        assert_eq!(eff.columns.dealer_price, "Dealer Price");
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let eff = resolve_effective(root.to_str(), None, None, None, None, None, None);
        assert_eq!(eff.input, None);
        assert_eq!(eff.output, "human");
        assert!(!eff.offline);
        assert_eq!(eff.timeout_secs, 10);
        assert!(!eff.write_report);
    }
}
