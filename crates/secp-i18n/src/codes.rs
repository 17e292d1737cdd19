use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Dictionary, keys};

/// Error codes the SECP API reports in `code` / `error` fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthorized,
    InvalidToken,
    Forbidden,
    InvalidCredentials,
    InvalidCode,
    NotFound,
    Conflict,
    UnprocessableEntity,
    ValidationError,
    BadJson,
    RateLimited,
    SmsCooldown,
    SmsDailyLimit,
    ServerError,
    PdfRenderFailed,
}

/// Where a code's display text comes from
enum Message {
    /// Looked up in the locale dictionary
    Key(&'static str),
    /// Fixed zh-CN text
    Literal(&'static str),
}

impl ErrorCode {
    /// Parse a code as sent by the server; surrounding whitespace is ignored
    pub fn parse(code: &str) -> Option<Self> {
        code.trim().parse().ok()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    const fn message(self) -> Message {
        match self {
            Self::Unauthorized | Self::InvalidToken => Message::Key(keys::UNAUTHORIZED),
            Self::Forbidden => Message::Key(keys::FORBIDDEN),
            Self::InvalidCredentials => Message::Literal("用户名或密码错误。"),
            Self::InvalidCode => Message::Literal("验证码错误。"),
            Self::NotFound => Message::Key(keys::NOT_FOUND),
            Self::Conflict => Message::Literal("请求冲突，请稍后重试。"),
            Self::UnprocessableEntity => Message::Literal("请求参数不符合要求。"),
            Self::ValidationError => Message::Key(keys::VALIDATION),
            Self::BadJson => Message::Key(keys::BAD_JSON),
            Self::RateLimited => Message::Literal("操作过于频繁，请稍后再试。"),
            Self::SmsCooldown => Message::Literal("发送过于频繁，请稍后再试。"),
            Self::SmsDailyLimit => Message::Literal("今日验证码发送次数已达上限，请明天再试。"),
            Self::ServerError => Message::Key(keys::SERVER),
            Self::PdfRenderFailed => Message::Literal("打印文件生成失败，请稍后重试。"),
        }
    }

    /// Human-readable text for this code in the dictionary's locale
    pub fn localize(self, dictionary: &Dictionary) -> String {
        match self.message() {
            Message::Key(key) => dictionary.resolve(key),
            Message::Literal(text) => text.to_owned(),
        }
    }
}

/// Localize a raw error code
///
/// Returns an empty string for blank or unrecognized codes; callers supply
/// their own fallback (usually the raw code).
pub fn localize_error_code(dictionary: &Dictionary, code: &str) -> String {
    ErrorCode::parse(code)
        .map(|code| code.localize(dictionary))
        .unwrap_or_default()
}
