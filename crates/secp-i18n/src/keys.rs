//! Dictionary keys referenced by the client itself

pub const UNAUTHORIZED: &str = "error.unauthorized";
pub const FORBIDDEN: &str = "error.forbiddenInternalOnly";
pub const NOT_FOUND: &str = "error.notFound";
pub const VALIDATION: &str = "error.validation";
pub const BAD_JSON: &str = "error.badJson";
pub const SERVER: &str = "error.server";
pub const TO_LOGIN: &str = "error.toLogin";
pub const REQUEST_FAILED: &str = "common.requestFailed";
