// Login, signup and logout

use std::convert::Infallible;

use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::reply::Response;

use super::{expired_session_cookie, html, redirect_with_cookie, session_cookie};
use crate::models::{LoginForm, SignupForm};
use crate::pages;
use crate::session::parse_session_id;
use crate::state::AppState;
use crate::store::StoreError;

const LOGIN_FAILED: &str = "Invalid email or password";
const PASSWORDS_DIFFER: &str = "Passwords do not match";
const SIGNUP_FAILED: &str = "Error creating user";

// GET /login
pub async fn login_form_handler() -> Result<Response, Infallible> {
    Ok(html(pages::login_page(None), StatusCode::OK))
}

// POST /login
pub async fn login_handler(state: AppState, form: LoginForm) -> Result<Response, Infallible> {
    let user = match state.store.authenticate_user(&form.email, &form.password).await {
        Ok(user) => user,
        Err(StoreError::InvalidCredentials) => {
            warn!("login rejected");
            return Ok(html(pages::login_page(Some(LOGIN_FAILED)), StatusCode::UNAUTHORIZED));
        }
        Err(e) => {
            error!(error = %e, "login failed");
            return Ok(html(
                pages::login_page(Some(LOGIN_FAILED)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }
    };

    // A failed history load starts the user with an empty transcript
    let history = match state.store.get_chat_history(user.id).await {
        Ok(history) => history,
        Err(e) => {
            warn!(user_id = %user.id, error = %e, "could not load chat history");
            Vec::new()
        }
    };

    let session = state.sessions.create(user.id, history).await;
    info!(user_id = %user.id, "user logged in");
    Ok(redirect_with_cookie("/", session_cookie(session)))
}

// GET /signup
pub async fn signup_form_handler() -> Result<Response, Infallible> {
    Ok(html(pages::signup_page(None), StatusCode::OK))
}

// POST /signup
pub async fn signup_handler(state: AppState, form: SignupForm) -> Result<Response, Infallible> {
    if form.password != form.confirm_password {
        return Ok(html(pages::signup_page(Some(PASSWORDS_DIFFER)), StatusCode::BAD_REQUEST));
    }

    let user = match state
        .store
        .create_user(&form.username, &form.email, &form.password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            let status = match e {
                StoreError::Conflict(_) => StatusCode::CONFLICT,
                StoreError::Validation(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!(error = %e, "signup failed");
            return Ok(html(pages::signup_page(Some(SIGNUP_FAILED)), status));
        }
    };

    let session = state.sessions.create(user.id, Vec::new()).await;
    info!(user_id = %user.id, "user signed up");
    Ok(redirect_with_cookie("/", session_cookie(session)))
}

// GET|POST /logout
pub async fn logout_handler(state: AppState, cookie: Option<String>) -> Result<Response, Infallible> {
    if let Some(session) = parse_session_id(cookie.as_deref()) {
        if let Some(ended) = state.sessions.remove(session).await {
            if !ended.transcript.is_empty() {
                if let Err(e) = state
                    .store
                    .save_chat_history(ended.user_id, ended.transcript.lines())
                    .await
                {
                    error!(user_id = %ended.user_id, error = %e, "failed to save chat history on logout");
                }
            }
            info!(user_id = %ended.user_id, "user logged out");
        }
    }

    Ok(redirect_with_cookie("/login", expired_session_cookie()))
}
