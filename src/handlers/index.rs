// GET / handler

use std::convert::Infallible;

use warp::http::StatusCode;
use warp::reply::Response;

use super::{authenticate, html, redirect};
use crate::pages;
use crate::state::AppState;

pub async fn index_handler(state: AppState, cookie: Option<String>) -> Result<Response, Infallible> {
    let Some((session, user)) = authenticate(&state, cookie.as_deref()).await else {
        return Ok(redirect("/login"));
    };

    let transcript = state.sessions.snapshot(session).await.unwrap_or_default();
    Ok(html(pages::index_page(&user, &transcript), StatusCode::OK))
}
