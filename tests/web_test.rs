//! Web front-end tests against an in-memory store and a scripted model

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use askai::llm::{ChatProvider, LlmError};
use askai::models::{ChatResponse, ServerEvent};
use askai::routes::configure_routes;
use askai::state::AppState;
use askai::store::{MemoryStore, Repository};
use async_trait::async_trait;
use warp::http::{Response, StatusCode};
use warp::test::request;
use warp::{Filter, Reply};

const FORM: &str = "application/x-www-form-urlencoded";

/// Answers "echo: <prompt>", fails for the prompt "fail" and takes a
/// while for the prompt "slow"
struct ScriptedProvider;

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if prompt == "slow" {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        if prompt == "fail" {
            return Err(LlmError::HttpError {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(format!("echo: {}", prompt))
    }
}

fn setup() -> (
    AppState,
    impl Filter<Extract = impl Reply, Error = std::convert::Infallible> + Clone + 'static,
) {
    let store: Arc<dyn Repository> = Arc::new(MemoryStore::new());
    let state = AppState::new(Arc::new(ScriptedProvider), store);
    let routes = configure_routes(state.clone(), PathBuf::from("static"));
    (state, routes)
}

/// The `session=<uuid>` pair from a Set-Cookie header
fn session_cookie<B>(response: &Response<B>) -> String {
    let header = response
        .headers()
        .get("set-cookie")
        .expect("no set-cookie header")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().to_string()
}

fn location<B>(response: &Response<B>) -> &str {
    response.headers().get("location").unwrap().to_str().unwrap()
}

fn body_text<B: AsRef<[u8]>>(response: &Response<B>) -> String {
    String::from_utf8_lossy(response.body().as_ref()).into_owned()
}

async fn signup<F>(routes: &F, email: &str, password: &str) -> String
where
    F: Filter + Clone + 'static,
    F::Extract: Reply + Send,
{
    let body = format!(
        "username=ada&email={}&password={}&confirm_password={}",
        email, password, password
    );
    let response = request()
        .method("POST")
        .path("/signup")
        .header("content-type", FORM)
        .body(body)
        .reply(routes)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    session_cookie(&response)
}

async fn chat<F>(routes: &F, cookie: &str, message: &str) -> Response<impl AsRef<[u8]>>
where
    F: Filter + Clone + 'static,
    F::Extract: Reply + Send,
{
    request()
        .method("POST")
        .path("/chat")
        .header("content-type", FORM)
        .header("cookie", cookie)
        .body(format!("message={}", message))
        .reply(routes)
        .await
}

#[tokio::test]
async fn test_index_redirects_to_login() {
    let (_state, routes) = setup();

    let response = request().method("GET").path("/").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = request()
        .method("GET")
        .path("/")
        .header("cookie", "session=not-a-uuid")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_and_signup_forms() {
    let (_state, routes) = setup();

    let response = request().method("GET").path("/login").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(&response).contains(r#"action="/login""#));

    let response = request().method("GET").path("/signup").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(&response).contains("confirm_password"));
}

#[tokio::test]
async fn test_chat_requires_session() {
    let (_state, routes) = setup();

    let response = chat(&routes, "session=00000000-0000-0000-0000-000000000000", "hi").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = request()
        .method("POST")
        .path("/chat")
        .header("content-type", FORM)
        .body("message=hi")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // No body at all is still an auth failure, not a length error
    let response = request().method("POST").path("/chat").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_chat_without_body_is_bad_request() {
    let (_state, routes) = setup();
    let cookie = signup(&routes, "ada@example.com", "pw").await;

    let response = request()
        .method("POST")
        .path("/chat")
        .header("cookie", &cookie)
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(&response), "Message is required");
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let (_state, routes) = setup();
    let cookie = signup(&routes, "ada@example.com", "pw").await;

    let response = chat(&routes, &cookie, "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = chat(&routes, &cookie, "+++").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(&response), "Message is required");
}

#[tokio::test]
async fn test_chat_turn_is_persisted() {
    let (state, routes) = setup();
    let cookie = signup(&routes, "ada@example.com", "pw").await;

    let response = chat(&routes, &cookie, "hello+there").await;
    assert_eq!(response.status(), StatusCode::OK);
    let reply: ChatResponse = serde_json::from_slice(response.body().as_ref()).unwrap();
    assert_eq!(reply.response, "echo: hello there");

    let user = state
        .store
        .authenticate_user("ada@example.com", "pw")
        .await
        .unwrap();
    let history = state.store.get_chat_history(user.id).await.unwrap();
    assert_eq!(history, vec!["You: hello there", "AI: echo: hello there"]);

    // The page renders the transcript
    let response = request()
        .method("GET")
        .path("/")
        .header("cookie", &cookie)
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(&response);
    assert!(page.contains("You: hello there"));
    assert!(page.contains("AI: echo: hello there"));
}

#[tokio::test]
async fn test_message_is_forwarded_untrimmed() {
    let (state, routes) = setup();
    let cookie = signup(&routes, "ada@example.com", "pw").await;

    let response = chat(&routes, &cookie, "+hi+").await;
    assert_eq!(response.status(), StatusCode::OK);
    let reply: ChatResponse = serde_json::from_slice(response.body().as_ref()).unwrap();
    assert_eq!(reply.response, "echo:  hi ");

    let user = state
        .store
        .authenticate_user("ada@example.com", "pw")
        .await
        .unwrap();
    let history = state.store.get_chat_history(user.id).await.unwrap();
    assert_eq!(history, vec!["You:  hi ", "AI: echo:  hi "]);
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let (_state, routes) = setup();
    let cookie = signup(&routes, "ada@example.com", "pw").await;

    let response = chat(&routes, &cookie, "fail").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_new_chat_clears_history() {
    let (state, routes) = setup();
    let cookie = signup(&routes, "ada@example.com", "pw").await;
    chat(&routes, &cookie, "one").await;

    let response = request()
        .method("POST")
        .path("/new-chat")
        .header("cookie", &cookie)
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let user = state
        .store
        .authenticate_user("ada@example.com", "pw")
        .await
        .unwrap();
    assert!(state.store.get_chat_history(user.id).await.unwrap().is_empty());

    let response = request()
        .method("GET")
        .path("/")
        .header("cookie", &cookie)
        .reply(&routes)
        .await;
    assert!(!body_text(&response).contains("You: one"));
}

#[tokio::test]
async fn test_new_chat_while_reply_pending_stays_cleared() {
    let (state, routes) = setup();
    let cookie = signup(&routes, "ada@example.com", "pw").await;
    chat(&routes, &cookie, "one").await;

    let new_chat = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        request()
            .method("POST")
            .path("/new-chat")
            .header("cookie", &cookie)
            .reply(&routes)
            .await
    };
    let (reply, cleared) = tokio::join!(chat(&routes, &cookie, "slow"), new_chat);
    assert_eq!(reply.status(), StatusCode::OK);
    assert_eq!(cleared.status(), StatusCode::OK);

    let user = state
        .store
        .authenticate_user("ada@example.com", "pw")
        .await
        .unwrap();
    assert!(state.store.get_chat_history(user.id).await.unwrap().is_empty());

    let response = request()
        .method("GET")
        .path("/")
        .header("cookie", &cookie)
        .reply(&routes)
        .await;
    let page = body_text(&response);
    assert!(!page.contains("You: one"));
    assert!(!page.contains("You: slow"));
    assert!(!page.contains("AI: echo: slow"));

    // The next turn starts from an empty transcript
    chat(&routes, &cookie, "two").await;
    let history = state.store.get_chat_history(user.id).await.unwrap();
    assert_eq!(history, vec!["You: two", "AI: echo: two"]);
}

#[tokio::test]
async fn test_new_chat_requires_session() {
    let (_state, routes) = setup();
    let response = request().method("POST").path("/new-chat").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_errors() {
    let (_state, routes) = setup();

    let response = request()
        .method("POST")
        .path("/signup")
        .header("content-type", FORM)
        .body("username=ada&email=ada%40example.com&password=a&confirm_password=b")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(&response).contains("Passwords do not match"));

    signup(&routes, "ada@example.com", "pw").await;
    let response = request()
        .method("POST")
        .path("/signup")
        .header("content-type", FORM)
        .body("username=ada&email=ada%40example.com&password=pw&confirm_password=pw")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(body_text(&response).contains("Error creating user"));
}

#[tokio::test]
async fn test_login_failure() {
    let (_state, routes) = setup();
    signup(&routes, "ada@example.com", "pw").await;

    let response = request()
        .method("POST")
        .path("/login")
        .header("content-type", FORM)
        .body("email=ada%40example.com&password=wrong")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(&response).contains("Invalid email or password"));
    assert!(response.headers().get("set-cookie").is_none());
}

#[tokio::test]
async fn test_logout_then_login_restores_history() {
    let (_state, routes) = setup();
    let cookie = signup(&routes, "ada@example.com", "pw").await;
    chat(&routes, &cookie, "remember+me").await;

    let response = request()
        .method("GET")
        .path("/logout")
        .header("cookie", &cookie)
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    // The old session is gone
    let response = chat(&routes, &cookie, "hi").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = request()
        .method("POST")
        .path("/login")
        .header("content-type", FORM)
        .body("email=ada%40example.com&password=pw")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&response);

    let response = request()
        .method("GET")
        .path("/")
        .header("cookie", &cookie)
        .reply(&routes)
        .await;
    assert!(body_text(&response).contains("You: remember me"));
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let (_state, routes) = setup();
    let ada = signup(&routes, "ada@example.com", "pw").await;
    let bob = signup(&routes, "bob@example.com", "pw").await;

    chat(&routes, &ada, "secret").await;

    let response = request()
        .method("GET")
        .path("/")
        .header("cookie", &bob)
        .reply(&routes)
        .await;
    assert!(!body_text(&response).contains("secret"));
}

#[tokio::test]
async fn test_websocket_receives_turns() {
    let (state, routes) = setup();
    let cookie = signup(&routes, "ada@example.com", "pw").await;

    let mut client = warp::test::ws()
        .path("/ws")
        .header("cookie", &cookie)
        .handshake(routes.clone())
        .await
        .expect("handshake");

    // Registration happens on the upgraded connection's task
    for _ in 0..100 {
        if state.clients.len() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(state.clients.len(), 1);

    chat(&routes, &cookie, "ping").await;
    let msg = client.recv().await.expect("turn event");
    let event: ServerEvent = serde_json::from_str(msg.to_str().unwrap()).unwrap();
    assert_eq!(
        event,
        ServerEvent::Turn {
            user: "ping".to_string(),
            reply: "echo: ping".to_string(),
        }
    );

    request()
        .method("POST")
        .path("/new-chat")
        .header("cookie", &cookie)
        .reply(&routes)
        .await;
    let msg = client.recv().await.expect("cleared event");
    let event: ServerEvent = serde_json::from_str(msg.to_str().unwrap()).unwrap();
    assert_eq!(event, ServerEvent::Cleared);
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let (_state, routes) = setup();

    let response = request().method("GET").path("/static/app.js").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(&response).contains("WebSocket"));

    let response = request().method("GET").path("/static/style.css").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_method_not_allowed_and_not_found() {
    let (_state, routes) = setup();

    let response = request().method("DELETE").path("/chat").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = request().method("GET").path("/nope").reply(&routes).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
