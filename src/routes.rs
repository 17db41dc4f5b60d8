// Route definitions and handlers

use std::convert::Infallible;
use std::path::PathBuf;

use warp::Filter;

use crate::handlers;
use crate::models::ChatForm;
use crate::session::SESSION_COOKIE;
use crate::state::AppState;

/// Largest accepted form body
const MAX_FORM_BYTES: u64 = 64 * 1024;

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn session_cookie() -> impl Filter<Extract = (Option<String>,), Error = Infallible> + Clone {
    warp::cookie::optional::<String>(SESSION_COOKIE)
}

fn form<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_FORM_BYTES).and(warp::body::form())
}

// A missing or unreadable body becomes an empty form so the handler can
// check the session first
fn chat_form() -> impl Filter<Extract = (ChatForm,), Error = Infallible> + Clone {
    form::<ChatForm>().or(warp::any().map(ChatForm::default)).unify()
}

pub fn configure_routes(
    state: AppState,
    static_dir: PathBuf,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    // GET /
    let index = warp::path::end()
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(session_cookie())
        .and_then(handlers::index_handler);

    // GET /login, POST /login
    let login_form = warp::path("login")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::login_form_handler);
    let login = warp::path("login")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(form())
        .and_then(handlers::login_handler);

    // GET /signup, POST /signup
    let signup_form = warp::path("signup")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::signup_form_handler);
    let signup = warp::path("signup")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(form())
        .and_then(handlers::signup_handler);

    // GET|POST /logout
    let logout = warp::path("logout")
        .and(warp::path::end())
        .and(warp::get().or(warp::post()).unify())
        .and(with_state(state.clone()))
        .and(session_cookie())
        .and_then(handlers::logout_handler);

    // POST /chat
    let chat = warp::path("chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(session_cookie())
        .and(chat_form())
        .and_then(handlers::chat_handler);

    // POST /new-chat
    let new_chat = warp::path("new-chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(session_cookie())
        .and_then(handlers::new_chat_handler);

    // GET /ws
    let ws = warp::path("ws")
        .and(warp::path::end())
        .and(warp::ws())
        .and(with_state(state))
        .and(session_cookie())
        .and_then(handlers::ws_handler);

    // GET /static/*
    let assets = warp::path("static").and(warp::fs::dir(static_dir));

    // Combine routes
    index
        .or(login_form)
        .or(login)
        .or(signup_form)
        .or(signup)
        .or(logout)
        .or(chat)
        .or(new_chat)
        .or(ws)
        .or(assets)
        .recover(handlers::handle_rejection)
}
