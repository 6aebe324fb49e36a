use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the built frontend, served as fallback
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub dir: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[logging]
dir = "logs"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Returns the path the config was read from, `None` for the embedded default.
pub fn load_config() -> anyhow::Result<(Config, Option<PathBuf>)> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                let config = parse_config(&contents)?;
                return Ok((config, Some(config_path)));
            }
        }
    }

    Ok((parse_config(DEFAULT_CONFIG)?, None))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

pub fn socket_addr(config: &Config) -> anyhow::Result<SocketAddr> {
    let ip: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server.host `{}`: {}", config.server.host, e))?;
    Ok(SocketAddr::new(ip, config.server.port))
}

/// Get the log directory from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_log_dir(config: &Config) -> PathBuf {
    resolve_path(&config.logging.dir, exe_dir().as_deref())
}

/// Get the frontend directory from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_static_dir(config: &Config) -> PathBuf {
    resolve_path(&config.server.static_dir, exe_dir().as_deref())
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

fn resolve_path(dir: &str, base: Option<&Path>) -> PathBuf {
    let dir = Path::new(dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    match base {
        Some(base) => base.join(dir),
        // Fallback: relative to current directory
        None => dir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(config.logging.dir, "logs");
        assert_eq!(socket_addr(&config).unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_host_is_reported() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        config.server.host = "localhost:3000".to_string();
        assert!(socket_addr(&config).is_err());
    }

    #[test]
    fn test_absolute_log_dir_is_kept() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        let dir = std::env::temp_dir().join("registration-logs");
        config.logging.dir = dir.to_string_lossy().into_owned();
        assert_eq!(get_log_dir(&config), dir);
    }

    #[test]
    fn test_relative_dirs_resolve_against_executable() {
        let base = std::env::temp_dir().join("registration-bin");
        assert_eq!(resolve_path("dist", Some(&base)), base.join("dist"));
        assert_eq!(
            resolve_path("../../crates/frontend/dist", Some(&base)),
            base.join("../../crates/frontend/dist")
        );
        assert_eq!(resolve_path("dist", None), PathBuf::from("dist"));

        let config = parse_config(DEFAULT_CONFIG).unwrap();
        let static_dir = get_static_dir(&config);
        assert!(static_dir.is_absolute() || static_dir == PathBuf::from("dist"));
        assert!(static_dir.ends_with("dist"));
    }
}
