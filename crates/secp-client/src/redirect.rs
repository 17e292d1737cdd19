use std::fmt;

use secp_i18n::{Dictionary, keys};
use url::Url;

/// Login page path on the SECP UI origin
pub const DEFAULT_LOGIN_PATH: &str = "/ui/login.html";

const LOGGED_OUT: &str = "已退出登录";
const GENERIC_FAILURE: &str = "发生错误。";

/// Why the user is being sent to the login page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectReason {
    /// Credential missing, expired, or rejected (HTTP 401)
    Unauthorized,
    /// Authenticated but not allowed (HTTP 403)
    Forbidden,
    /// User signed out
    Logout,
    /// Any other value found in a login URL
    Other(String),
}

impl RedirectReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::Logout => "logout",
            Self::Other(reason) => reason,
        }
    }

    /// Interpret a `reason` query value
    pub fn from_param(value: &str) -> Self {
        match value {
            "unauthorized" => Self::Unauthorized,
            "forbidden" => Self::Forbidden,
            "logout" => Self::Logout,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation to the login page, reported instead of performed
///
/// The embedding environment should replace the current location with
/// [`location`](Self::location) so "back" cannot return to the failed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    reason: RedirectReason,
    message: Option<String>,
    location: Url,
}

impl LoginRedirect {
    /// Build a redirect to `login_page`
    ///
    /// Empty reasons and messages are left out of the query string.
    pub fn new(login_page: &Url, reason: RedirectReason, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.is_empty());

        let mut location = login_page.clone();
        location.set_query(None);
        location.set_fragment(None);
        {
            let mut query = location.query_pairs_mut();
            if !reason.as_str().is_empty() {
                query.append_pair("reason", reason.as_str());
            }
            if let Some(message) = &message {
                query.append_pair("message", message);
            }
        }
        if location.query() == Some("") {
            location.set_query(None);
        }

        Self {
            reason,
            message,
            location,
        }
    }

    /// Redirect shown after the user signs out
    pub fn logout(login_page: &Url) -> Self {
        Self::new(login_page, RedirectReason::Logout, None)
    }

    pub fn reason(&self) -> &RedirectReason {
        &self.reason
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Login page URL carrying `reason` and `message`
    pub fn location(&self) -> &Url {
        &self.location
    }
}

/// Notice shown on the login page, derived from its query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginBanner {
    /// Plain display text
    Text(String),
    /// Unrecognized reason: generic text plus the raw reason as debug detail
    ///
    /// `debug` is untrusted input from the URL; renderers must escape it.
    Generic {
        /// Display text
        message: String,
        /// `reason=<raw value>`
        debug: String,
    },
}

impl LoginBanner {
    /// Banner for a login page URL, if its query asks for one
    pub fn from_url(url: &Url, dictionary: &Dictionary) -> Option<Self> {
        let param = |name: &str| {
            url.query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };

        Self::from_params(param("reason").as_deref(), param("message").as_deref(), dictionary)
    }

    /// Banner for raw `reason` / `message` values
    ///
    /// An explicit message always wins; empty values count as absent.
    pub fn from_params(reason: Option<&str>, message: Option<&str>, dictionary: &Dictionary) -> Option<Self> {
        let reason = reason.filter(|r| !r.is_empty());
        let message = message.filter(|m| !m.is_empty());

        if let Some(message) = message {
            return Some(Self::Text(message.to_owned()));
        }

        let banner = match RedirectReason::from_param(reason?) {
            RedirectReason::Unauthorized => Self::Text(dictionary.resolve(keys::TO_LOGIN)),
            RedirectReason::Logout => Self::Text(LOGGED_OUT.to_owned()),
            RedirectReason::Forbidden => Self::Text(dictionary.resolve(keys::FORBIDDEN)),
            RedirectReason::Other(raw) => Self::Generic {
                message: GENERIC_FAILURE.to_owned(),
                debug: format!("reason={raw}"),
            },
        };

        Some(banner)
    }

    /// Display text of the banner
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Generic { message: text, .. } => text,
        }
    }
}
