//! The rendered "You:"/"AI:" lines of one conversation

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const USER_PREFIX: &str = "You: ";
pub const AI_PREFIX: &str = "AI: ";
pub const ERROR_PREFIX: &str = "Error: ";

/// Who produced a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Ai,
    Error,
    Other,
}

impl Speaker {
    /// Classify a rendered line by its prefix
    pub fn of(line: &str) -> Self {
        if line.starts_with(USER_PREFIX) {
            Speaker::User
        } else if line.starts_with(AI_PREFIX) {
            Speaker::Ai
        } else if line.starts_with(ERROR_PREFIX) {
            Speaker::Error
        } else {
            Speaker::Other
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn push_user(&mut self, text: &str) {
        self.lines.push(format!("{}{}", USER_PREFIX, text));
    }

    pub fn push_ai(&mut self, text: &str) {
        self.lines.push(format!("{}{}", AI_PREFIX, text));
    }

    pub fn push_error(&mut self, text: &str) {
        self.lines.push(format!("{}{}", ERROR_PREFIX, text));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append lines `from..` to `path`, one per line, creating the file if needed
    pub fn append_to_file(&self, path: &Path, from: usize) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        for line in self.lines.iter().skip(from) {
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}
