//! Handler functions for config CLI commands.
//!
//! Implements the `path`, `show`, `get`, and `init` subcommands over
//! [`TaslConfig`], plus a TOML dotted-key lookup helper.

use std::io::Write;
use std::path::PathBuf;

use tasl_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::{PROJECT_NAME, TaslConfig};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand, writing results to stdout.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match action {
        ConfigAction::Path => cmd_config_path(config_path, &mut out),
        ConfigAction::Show => cmd_config_show(config_path, &mut out),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key, &mut out),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force, &mut out),
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>, out: &mut dyn Write) -> Result<()> {
    match TaslConfig::resolve_config_path(config_path) {
        Some(path) => {
            writeln!(out, "{}", path.display())?;
            if !path.exists() {
                log::warn!("{} does not exist; run `{PROJECT_NAME} config init` to create it", path.display());
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Print the effective configuration.
pub fn cmd_config_show(config_path: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let config = TaslConfig::load(config_path)?;
    write!(out, "{}", config.to_toml_string()?)?;
    Ok(())
}

/// Get a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str, out: &mut dyn Write) -> Result<()> {
    let config = TaslConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    match get_nested_value(&value, key) {
        Some(val) => {
            writeln!(out, "{}", format_toml_value(val))?;
            Ok(())
        }
        None => Err(Error::config(format!(
            "Key '{key}' not found in configuration"
        ))),
    }
}

/// Create a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool, out: &mut dyn Write) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => TaslConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = TaslConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = value;
    for part in key.split('.') {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, text: &str) -> String {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, text).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    // ------------------------------------------------------------------------
    // cmd_config_path tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_path_explicit() {
        let mut buf = Vec::new();
        cmd_config_path(Some("/explicit/config.toml"), &mut buf).unwrap();
        assert_eq!(output(buf), "/explicit/config.toml\n");
    }

    // ------------------------------------------------------------------------
    // cmd_config_show / cmd_config_get tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_show_merges_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "extension = \"md\"\n");
        let mut buf = Vec::new();

        cmd_config_show(Some(&path), &mut buf).unwrap();

        let text = output(buf);
        assert!(text.contains("extension = \"md\""));
        assert!(text.contains("template = \"template1\""));
    }

    #[test]
    fn test_cmd_config_get_simple_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "template = \"mine\"\n");
        let mut buf = Vec::new();

        cmd_config_get(Some(&path), "template", &mut buf).unwrap();
        assert_eq!(output(buf), "mine\n");
    }

    #[test]
    fn test_cmd_config_get_nested_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "");
        let mut buf = Vec::new();

        cmd_config_get(Some(&path), "tags.namespace", &mut buf).unwrap();
        assert_eq!(output(buf), "tasl\n");
    }

    #[test]
    fn test_cmd_config_get_missing_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "");

        let result = cmd_config_get(Some(&path), "nonexistent.key", &mut Vec::new());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    // ------------------------------------------------------------------------
    // cmd_config_init tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_init_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tasl").join("config.toml");

        cmd_config_init(Some(path.to_str().unwrap()), false, &mut Vec::new()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("extension = \"qmd\""));
        assert!(content.contains("[tags]"));
    }

    #[test]
    fn test_cmd_config_init_no_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "existing");

        let result = cmd_config_init(Some(&path), false, &mut Vec::new());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[test]
    fn test_cmd_config_init_force_overwrites() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "old content");

        cmd_config_init(Some(&path), true, &mut Vec::new()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("template"));
    }

    // ------------------------------------------------------------------------
    // get_nested_value tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_nested_value_top_level() {
        let val: toml::Value = toml::from_str("extension = \"qmd\"").unwrap();
        assert_eq!(
            get_nested_value(&val, "extension"),
            Some(&toml::Value::String("qmd".into()))
        );
    }

    #[test]
    fn test_get_nested_value_nested() {
        let val: toml::Value = toml::from_str("[tags]\nnamespace = \"x\"").unwrap();
        assert_eq!(
            get_nested_value(&val, "tags.namespace"),
            Some(&toml::Value::String("x".into()))
        );
    }

    #[test]
    fn test_get_nested_value_missing() {
        let val: toml::Value = toml::from_str("[tags]\nnamespace = \"x\"").unwrap();
        assert!(get_nested_value(&val, "nonexistent").is_none());
        assert!(get_nested_value(&val, "tags.nonexistent").is_none());
        assert!(get_nested_value(&val, "tags.namespace.deeper").is_none());
    }

    // ------------------------------------------------------------------------
    // format_toml_value tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_format_toml_value() {
        assert_eq!(format_toml_value(&toml::Value::String("hello".into())), "hello");
        assert_eq!(format_toml_value(&toml::Value::Integer(42)), "42");
        assert_eq!(format_toml_value(&toml::Value::Boolean(true)), "true");
    }
}
