//! Compile-time configuration for the frontend.
//!
//! Values that differ between deployments are read from the build
//! environment with [option_env], so `FINTRACK_API_BASE=https://... trunk build`
//! points the bundle at another backend.

/// Base URL every API path is appended to.
pub const API_BASE_URL: &str = match option_env!("FINTRACK_API_BASE") {
    Some(url) => url,
    None => "http://localhost:8080",
};

/// `tracing` filter directive used when the app starts, e.g. `debug` or
/// `fintrack_frontend::api=trace`.
pub const LOG_FILTER: &str = match option_env!("FINTRACK_LOG") {
    Some(filter) => filter,
    None => "info",
};

pub const API_LOGIN: &str = "/api/auth/login";
pub const API_LOGOUT: &str = "/api/auth/logout";
pub const API_USER_INFO: &str = "/api/get-user-info";
pub const API_SIGN_UP: &str = "/api/sign-up";
pub const API_ACCOUNTS: &str = "/api/accounts";
pub const API_CATEGORIES: &str = "/api/categories";
pub const API_TRANSACTIONS: &str = "/api/transactions";
pub const API_REPORT: &str = "/api/report";

pub const LOGIN_PAGE: &str = "login.html";
pub const REGISTER_PAGE: &str = "register.html";
pub const ACCOUNTS_PAGE: &str = "accounts.html";
pub const REPORT_PAGE: &str = "report.html";

/// Session storage key holding the one-shot notice shown after a redirect.
pub const FLASH_KEY: &str = "flash";
