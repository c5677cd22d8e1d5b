use std::path::{Path, PathBuf};

use anyhow::Context;
use toml::{map::Map, Value};

pub static CONFIG_DIR_ENV: &str = "CONFIG_DIR";

/// Directory holding `Config.toml` and `Secrets.toml`: `CONFIG_DIR` when set,
/// otherwise the nearest directory containing `Config.toml` above the working
/// directory or the executable.
pub fn config_dir() -> PathBuf {
    let override_dir = std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from);

    let mut starts = Vec::new();
    if let Ok(dir) = std::env::current_dir() {
        starts.push(dir);
    }
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        starts.push(dir);
    }

    resolve_config_dir(override_dir, &starts, "Config.toml")
}

pub fn resolve_config_dir(
    override_dir: Option<PathBuf>,
    starts: &[PathBuf],
    config_name: &str,
) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }

    starts
        .iter()
        .flat_map(|start| start.ancestors())
        .find(|dir| dir.join(config_name).is_file())
        .or_else(|| starts.first().map(PathBuf::as_path))
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

pub fn load_config(config_name: &str) -> anyhow::Result<Map<String, Value>> {
    read_config(&config_dir().join(config_name))
}

pub fn read_config(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let config = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    parse_config(&config)
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse_config(text: &str) -> anyhow::Result<Map<String, Value>> {
    Ok(toml::from_str::<Map<String, Value>>(text)?)
}

/// Secrets from `Secrets.toml`, empty when the file does not exist.
pub fn load_env() -> anyhow::Result<Map<String, Value>> {
    let path = config_dir().join("Secrets.toml");
    if !path.exists() {
        return Ok(Map::new());
    }

    let secrets = std::fs::read_to_string(&path)
        .context("failed to read Secrets.toml")?;

    toml::from_str::<Map<String, Value>>(&secrets)
        .context("failed to parse Secrets.toml")
}

/// Looks a secret up in the process environment first, then in `Secrets.toml`.
pub fn secret(
    secrets: &Map<String, Value>,
    key: &str,
) -> anyhow::Result<String> {
    if let Ok(value) = std::env::var(key) {
        return Ok(value);
    }

    secrets
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .with_context(|| format!("{key} was not found"))
}

pub fn config_str<'a>(
    config: &'a Map<String, Value>,
    section: &str,
    key: &str,
) -> anyhow::Result<&'a str> {
    config
        .get(section)
        .with_context(|| format!("failed to get {section} config"))?
        .get(key)
        .with_context(|| format!("failed to load {key} config"))?
        .as_str()
        .with_context(|| format!("failed to parse {key} config"))
}

pub fn config_integer(
    config: &Map<String, Value>,
    section: &str,
    key: &str,
) -> anyhow::Result<i64> {
    config
        .get(section)
        .with_context(|| format!("failed to get {section} config"))?
        .get(key)
        .with_context(|| format!("failed to load {key} config"))?
        .as_integer()
        .with_context(|| format!("failed to parse {key} config"))
}
