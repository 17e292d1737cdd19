use serde::Deserialize;
use url::Url;

/// Where the API lives and how its UI paths are laid out
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Origin serving both the API and the UI (e.g. `https://secp.example.com`)
    pub base_url: Url,
    /// Locale dictionary to load
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Login page that 401/403 answers redirect to
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Directory holding `<locale>.json` dictionaries
    #[serde(default = "default_i18n_path")]
    pub i18n_path: String,
}

fn default_locale() -> String {
    "zh-CN".to_owned()
}

fn default_login_path() -> String {
    "/ui/login.html".to_owned()
}

fn default_i18n_path() -> String {
    "/ui/i18n".to_owned()
}
