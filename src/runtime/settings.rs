use crate::config;

/// Load settings, falling back to defaults on any failure. An explicit store
/// url from the command line replaces `remote.base_url`.
pub fn load_settings(base_url_arg: Option<String>) -> config::Settings {
    let mut settings = match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("musictop: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("musictop: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    };

    if let Some(url) = base_url_arg.filter(|u| !u.trim().is_empty()) {
        settings.remote.base_url = url;
    }
    settings
}
