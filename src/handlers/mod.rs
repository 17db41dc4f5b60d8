// Handlers module

pub mod auth;
pub mod chat;
pub mod index;
pub mod rejection;
pub mod ws;

pub use auth::{login_form_handler, login_handler, logout_handler, signup_form_handler, signup_handler};
pub use chat::{chat_handler, new_chat_handler};
pub use index::index_handler;
pub use rejection::handle_rejection;
pub use ws::ws_handler;

use tracing::warn;
use warp::http::{StatusCode, Uri};
use warp::reply::Response;
use warp::Reply;

use crate::session::{parse_session_id, SessionId, SESSION_COOKIE};
use crate::state::AppState;
use crate::store::User;

/// Resolve the session cookie to a live session and its user
///
/// A session whose user can no longer be loaded counts as logged out.
pub(crate) async fn authenticate(state: &AppState, cookie: Option<&str>) -> Option<(SessionId, User)> {
    let session = parse_session_id(cookie)?;
    let user_id = state.sessions.user_id(session).await?;
    match state.store.get_user_by_id(user_id).await {
        Ok(user) => Some((session, user)),
        Err(e) => {
            warn!(session = %session, error = %e, "session user could not be loaded");
            None
        }
    }
}

pub(crate) fn session_cookie(session: SessionId) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, session)
}

pub(crate) fn expired_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

pub(crate) fn redirect(location: &'static str) -> Response {
    warp::redirect::see_other(Uri::from_static(location)).into_response()
}

pub(crate) fn redirect_with_cookie(location: &'static str, cookie: String) -> Response {
    warp::reply::with_header(
        warp::redirect::see_other(Uri::from_static(location)),
        "set-cookie",
        cookie,
    )
    .into_response()
}

pub(crate) fn html(page: String, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::html(page), status).into_response()
}

pub(crate) fn text(message: &'static str, status: StatusCode) -> Response {
    warp::reply::with_status(message, status).into_response()
}
