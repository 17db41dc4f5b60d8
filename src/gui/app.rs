use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::llm::LlmError;
use crate::transcript::{AI_PREFIX, ERROR_PREFIX, USER_PREFIX};

pub const TITLE: &str = "AskAI Assistant";
pub const WELCOME: &str = "Welcome to AskAI Assistant!";
pub const PLACEHOLDER: &str = "Type your message here...";

/// Lines moved by PageUp/PageDown
const PAGE: u16 = 10;

/// What the event loop should do after a key press
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Submit(String),
    Quit,
}

/// State of the chat window
#[derive(Debug)]
pub struct GuiApp {
    /// Rendered conversation, starting with the welcome line
    pub lines: Vec<String>,
    /// Current contents of the input line
    pub input: String,
    /// How many lines the view is scrolled up from the bottom
    pub scroll_back: u16,
    /// A request is in flight; input is ignored until it finishes
    pub pending: bool,
}

impl Default for GuiApp {
    fn default() -> Self {
        Self::new()
    }
}

impl GuiApp {
    pub fn new() -> Self {
        Self {
            lines: vec![WELCOME.to_string(), String::new()],
            input: String::new(),
            scroll_back: 0,
            pending: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Up => self.scroll_back = self.scroll_back.saturating_add(1),
            KeyCode::Down => self.scroll_back = self.scroll_back.saturating_sub(1),
            KeyCode::PageUp => self.scroll_back = self.scroll_back.saturating_add(PAGE),
            KeyCode::PageDown => self.scroll_back = self.scroll_back.saturating_sub(PAGE),
            _ if self.pending => {}
            KeyCode::Enter => return self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
        Action::None
    }

    /// Take the input line if it holds anything besides whitespace
    fn submit(&mut self) -> Action {
        let prompt = self.input.trim().to_string();
        if prompt.is_empty() {
            return Action::None;
        }
        self.input.clear();
        Action::Submit(prompt)
    }

    pub fn begin_turn(&mut self, prompt: &str) {
        self.lines.push(format!("{}{}", USER_PREFIX, prompt));
        self.pending = true;
        self.scroll_back = 0;
    }

    pub fn finish_turn(&mut self, result: Result<String, LlmError>) {
        match result {
            Ok(reply) => {
                self.lines.push(format!("{}{}", AI_PREFIX, reply));
                self.lines.push(String::new());
            }
            Err(e) => self.lines.push(format!("{}{}", ERROR_PREFIX, e)),
        }
        self.pending = false;
        self.scroll_back = 0;
    }

    pub fn status(&self) -> &'static str {
        if self.pending {
            "Waiting for a reply..."
        } else {
            "Enter: send • ↑/↓ PgUp/PgDn: scroll • Esc: quit"
        }
    }
}
