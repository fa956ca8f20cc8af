mod crypto;
mod extractor;
mod middleware;
mod session;

pub use crypto::{hash_password, verify_password};
pub use extractor::CurrentUser;
pub use middleware::require_session;
pub use session::{
    clear_session_cookie, session_cookie, token_from_cookies, Session, SessionStore,
    SESSION_COOKIE,
};
