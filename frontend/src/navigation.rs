//! Which page is being shown, and moving between pages.

use crate::config;

/// A page of the app, resolved from the location path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Accounts,
    Report,
    NotFound,
}

impl Route {
    /// Resolve `path`, accepting both `/accounts.html` and `/accounts`.
    pub fn from_path(path: &str) -> Route {
        let page = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");
        let page = page.strip_suffix(".html").unwrap_or(page);

        match page {
            "" | "index" | "login" => Route::Login,
            "register" => Route::Register,
            "accounts" => Route::Accounts,
            "report" => Route::Report,
            _ => Route::NotFound,
        }
    }

    /// The route of the page currently loaded in the browser.
    pub fn current() -> Route {
        let path = web_sys::window().and_then(|window| window.location().pathname().ok());
        Route::from_path(path.as_deref().unwrap_or(""))
    }
}

/// Navigate the browser to `page`, unloading the current one.
pub fn redirect(page: &str) {
    tracing::info!("redirecting to {page}");
    let Some(window) = web_sys::window() else {
        tracing::error!("no window to redirect");
        return;
    };
    if let Err(error) = window.location().set_href(page) {
        tracing::error!("could not redirect to {page}: {error:?}");
    }
}

pub fn redirect_to_login() {
    redirect(config::LOGIN_PAGE);
}
