mod modal;
mod navbar;

pub use modal::Modal;
pub use navbar::NavBar;
