use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "BEETS_AUDIT_CONFIG";

const DEFAULT_ART_FILENAME: &str = "cover";

/// Raw TOML configuration structure
/// This matches the config.toml file structure exactly
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    library: Option<String>,
    art_filename: Option<String>,
}

/// Resolved audit configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Path to the beets `library.db`
    pub library: PathBuf,
    /// File stem beets gives album art (`art_filename` in the beets config)
    pub art_filename: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            library: default_library_path(),
            art_filename: DEFAULT_ART_FILENAME.to_string(),
        }
    }
}

/// Load configuration.
///
/// An `explicit` path (from the command line) must exist. Otherwise
/// `BEETS_AUDIT_CONFIG` is tried, then the XDG default location; a missing
/// default file yields [`AuditConfig::default`].
pub fn load_config(explicit: Option<&Path>) -> Result<AuditConfig> {
    if let Some(path) = explicit {
        return parse_config_toml(path);
    }

    if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
        return parse_config_toml(PathBuf::from(path));
    }

    match default_config_path() {
        Some(path) if path.exists() => parse_config_toml(path),
        _ => Ok(AuditConfig::default()),
    }
}

/// Parse config.toml from a file path
pub fn parse_config_toml<P: AsRef<Path>>(path: P) -> Result<AuditConfig> {
    let content = fs::read_to_string(path)?;
    parse_config_toml_str(&content)
}

/// Parse config.toml from a string (useful for testing)
pub fn parse_config_toml_str(content: &str) -> Result<AuditConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let library = match raw.library {
        Some(library) => {
            if library.trim().is_empty() {
                return Err(Error::ConfigParse("Empty path in 'library' field".to_string()));
            }
            expand_home(&library, home_dir())
        }
        None => default_library_path(),
    };

    let art_filename = match raw.art_filename {
        Some(name) => validate_art_filename(&name)?,
        None => DEFAULT_ART_FILENAME.to_string(),
    };

    Ok(AuditConfig {
        library,
        art_filename,
    })
}

/// `art_filename` names a file inside the album directory, never a path
fn validate_art_filename(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::ConfigParse(
            "Empty name in 'art_filename' field".to_string(),
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(Error::ConfigParse(format!(
            "'art_filename' must be a file name, not a path: '{}'",
            name
        )));
    }
    Ok(name.to_string())
}

/// Default config path under `$XDG_CONFIG_HOME/beets-audit/config.toml`
/// or `~/.config/beets-audit/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    config_home(env::var_os("XDG_CONFIG_HOME").map(PathBuf::from), home_dir())
        .map(|d| d.join("beets-audit").join("config.toml"))
}

/// Where beets keeps its library unless told otherwise: `$BEETSDIR`, then
/// `$XDG_CONFIG_HOME/beets`, then `~/.config/beets`
pub fn default_library_path() -> PathBuf {
    library_path_from(
        env::var_os("BEETSDIR").map(PathBuf::from),
        config_home(env::var_os("XDG_CONFIG_HOME").map(PathBuf::from), home_dir()),
    )
}

fn config_home(xdg: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    xdg.or_else(|| home.map(|h| h.join(".config")))
}

fn library_path_from(beetsdir: Option<PathBuf>, config_home: Option<PathBuf>) -> PathBuf {
    let dir = match beetsdir {
        Some(dir) => dir,
        None => config_home.unwrap_or_else(|| PathBuf::from(".")).join("beets"),
    };
    dir.join("library.db")
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// Expand a leading `~/` against `home`
fn expand_home(path: &str, home: Option<PathBuf>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
library = "/srv/beets/library.db"
art_filename = "folder"
        "#;

        let config = parse_config_toml_str(toml).unwrap();
        assert_eq!(config.library, PathBuf::from("/srv/beets/library.db"));
        assert_eq!(config.art_filename, "folder");
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config_toml_str("").unwrap();
        assert_eq!(config.art_filename, "cover");
        assert!(config.library.ends_with("library.db"));
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        let result = parse_config_toml_str("libary = \"/tmp/library.db\"");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_parse_rejects_empty_library() {
        let result = parse_config_toml_str("library = \"  \"");
        assert!(result.unwrap_err().to_string().contains("Empty path"));
    }

    #[test]
    fn test_art_filename_must_not_be_a_path() {
        assert!(validate_art_filename("cover").is_ok());
        assert_eq!(validate_art_filename("  folder ").unwrap(), "folder");
        assert!(validate_art_filename("").is_err());
        assert!(validate_art_filename("art/cover").is_err());
        assert!(validate_art_filename("..\\cover").is_err());
    }

    #[test]
    fn test_expand_home() {
        let home = Some(PathBuf::from("/home/user"));
        assert_eq!(
            expand_home("~/music/library.db", home.clone()),
            PathBuf::from("/home/user/music/library.db")
        );
        assert_eq!(
            expand_home("/abs/library.db", home),
            PathBuf::from("/abs/library.db")
        );
        assert_eq!(expand_home("~/library.db", None), PathBuf::from("~/library.db"));
    }

    #[test]
    fn test_library_path_prefers_beetsdir() {
        assert_eq!(
            library_path_from(Some(PathBuf::from("/beets")), Some(PathBuf::from("/xdg"))),
            PathBuf::from("/beets/library.db")
        );
    }

    #[test]
    fn test_library_path_follows_config_home() {
        let xdg = config_home(Some(PathBuf::from("/xdg")), Some(PathBuf::from("/home/u")));
        assert_eq!(
            library_path_from(None, xdg),
            PathBuf::from("/xdg/beets/library.db")
        );

        let home = config_home(None, Some(PathBuf::from("/home/u")));
        assert_eq!(
            library_path_from(None, home),
            PathBuf::from("/home/u/.config/beets/library.db")
        );
    }

    #[test]
    fn test_config_home_prefers_xdg() {
        assert_eq!(
            config_home(Some(PathBuf::from("/xdg")), Some(PathBuf::from("/home/u"))),
            Some(PathBuf::from("/xdg"))
        );
        assert_eq!(
            config_home(None, Some(PathBuf::from("/home/u"))),
            Some(PathBuf::from("/home/u/.config"))
        );
        assert_eq!(config_home(None, None), None);
    }

    #[test]
    fn test_load_config_explicit_missing_file_is_error() {
        let result = load_config(Some(Path::new("/nonexistent/beets-audit/config.toml")));
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
