use std::{env, path::PathBuf};

use super::schema::Settings;

/// Explicit config file location, overriding the XDG lookup.
const CONFIG_PATH_ENV: &str = "MUSICTOP_CONFIG_PATH";
/// Prefix of per-key overrides such as `MUSICTOP__REMOTE__BASE_URL`.
const ENV_PREFIX: &str = "MUSICTOP";
const APP_DIR: &str = "musictop";

impl Settings {
    /// Layer `MUSICTOP__SECTION__KEY` variables over the optional config file,
    /// over struct defaults. A missing file is not an error; the store url
    /// usually comes from here or from the command line.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Reject settings the board cannot run with: an empty top slice or a
    /// store url that is not absolute http(s).
    pub fn validate(&self) -> Result<(), String> {
        if self.board.top_n == 0 {
            return Err("board.top_n must be >= 1".to_string());
        }
        if let Err(e) = crate::remote::collection_url(&self.remote.base_url) {
            return Err(format!("remote.base_url: {e}"));
        }
        Ok(())
    }
}

/// `MUSICTOP_CONFIG_PATH` when set, else the XDG location.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/musictop/config.toml`, falling back to `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_base("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Where the session log goes when `log.path` is unset: under
/// `$XDG_STATE_HOME` or `~/.local/state`, else the temp dir. The terminal is
/// owned by the board, so logs never go to stdout.
pub fn default_log_path() -> PathBuf {
    match xdg_base("XDG_STATE_HOME", &[".local", "state"]) {
        Some(base) => base.join(APP_DIR).join("musictop.log"),
        None => env::temp_dir().join("musictop.log"),
    }
}

/// An XDG base directory: the variable when set, else `$HOME` joined with
/// `home_rel`.
fn xdg_base(var: &str, home_rel: &[&str]) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        return Some(PathBuf::from(dir));
    }
    let home = PathBuf::from(env::var_os("HOME")?);
    Some(home_rel.iter().fold(home, |p, part| p.join(part)))
}
