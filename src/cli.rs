//! Command-line flags

use std::net::SocketAddr;

use clap::Parser;

/// Chat with a hosted LLM from the terminal, a window or the browser
#[derive(Debug, Clone, Parser)]
#[command(name = "askai", version, about)]
pub struct Args {
    /// Save the conversation to a file
    #[arg(long)]
    pub save: bool,

    /// Start the windowed chat interface
    #[arg(long)]
    pub gui: bool,

    /// Start the web interface
    #[arg(long)]
    pub web: bool,

    /// Listen address for the web interface (overrides ASKAI_BIND)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,

    /// Keep users and history in memory instead of Postgres
    #[arg(long)]
    pub memory_store: bool,
}

/// Which front-end to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Terminal,
    Gui,
    Web,
}

impl Args {
    /// `--web` wins over `--gui`; the terminal loop is the default
    pub fn mode(&self) -> Mode {
        if self.web {
            Mode::Web
        } else if self.gui {
            Mode::Gui
        } else {
            Mode::Terminal
        }
    }
}
