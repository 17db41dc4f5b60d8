// HTML pages of the web front-end

use crate::store::User;
use crate::transcript::Speaker;

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str, script: bool) -> String {
    let script_tag = if script {
        r#"<script src="/static/app.js" defer></script>"#
    } else {
        ""
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css">
{script_tag}
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        script_tag = script_tag,
        body = body,
    )
}

fn error_block(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(r#"<p class="error">{}</p>"#, escape_html(message)),
        None => String::new(),
    }
}

pub fn login_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<main class="auth">
<h1>Log in to AskAI</h1>
{error}
<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
<p>No account? <a href="/signup">Sign up</a></p>
</main>"#,
        error = error_block(error),
    );
    layout("AskAI - Log in", &body, false)
}

pub fn signup_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<main class="auth">
<h1>Create an AskAI account</h1>
{error}
<form method="post" action="/signup">
<label>Username <input type="text" name="username" required></label>
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<label>Confirm password <input type="password" name="confirm_password" required></label>
<button type="submit">Sign up</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>
</main>"#,
        error = error_block(error),
    );
    layout("AskAI - Sign up", &body, false)
}

fn line_class(line: &str) -> &'static str {
    match Speaker::of(line) {
        Speaker::User => "user",
        Speaker::Ai => "ai",
        Speaker::Error => "error",
        Speaker::Other => "other",
    }
}

pub fn index_page(user: &User, transcript: &[String]) -> String {
    let lines: String = transcript
        .iter()
        .map(|line| {
            format!(
                r#"<div class="message {}">{}</div>"#,
                line_class(line),
                escape_html(line)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"<header>
<h1>AskAI</h1>
<span class="who">Signed in as {username}</span>
<form method="post" action="/new-chat" id="new-chat"><button type="submit">New chat</button></form>
<a href="/logout">Log out</a>
</header>
<main id="transcript">
{lines}
</main>
<form id="chat-form" method="post" action="/chat">
<input type="text" name="message" id="message" placeholder="Type your message here..." autocomplete="off" autofocus>
<button type="submit">Send</button>
</form>"#,
        username = escape_html(&user.username),
        lines = lines,
    );
    layout("AskAI", &body, true)
}
