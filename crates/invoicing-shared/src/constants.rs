//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 30;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const MIN_PASSWORD_LENGTH: u64 = 5;
pub const MAX_PASSWORD_LENGTH: u64 = 100;
pub const MIN_NAME_LENGTH: u64 = 2;
pub const MAX_NAME_LENGTH: u64 = 100;
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;

/// Role every authenticated user holds, whether stored or not.
pub const ROLE_USER: &str = "ROLE_USER";

pub const METHOD_POST: &str = "POST";
