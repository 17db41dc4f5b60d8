use std::path::Path;
use std::process;

use clap::Parser;
use tokio::io::BufReader;
use tracing::error;

use askai::cli::{Args, Mode};
use askai::config::{self, AppConfig};
use askai::error::AppError;
use askai::{gui, llm, logging, server, terminal};

/// Log file used while the window owns the screen
const GUI_LOG_FILE: &str = "askai.log";

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let mode = args.mode();

    let log_setup = match mode {
        Mode::Gui => logging::init_to_file(Path::new(GUI_LOG_FILE)),
        _ => {
            logging::init();
            Ok(())
        }
    };
    if let Err(e) = log_setup {
        eprintln!("Error opening {}: {}", GUI_LOG_FILE, e);
        process::exit(1);
    }

    if let Err(e) = run(args, mode).await {
        error!(error = %e, "fatal error");
        if mode == Mode::Gui {
            eprintln!("{}", e);
        }
        process::exit(1);
    }
}

async fn run(args: Args, mode: Mode) -> Result<(), AppError> {
    config::load_dotenv()?;
    let mut config = AppConfig::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let provider = llm::create_provider(&config.llm)?;

    match mode {
        Mode::Web => server::run(&config, provider, args.memory_store).await,
        Mode::Gui => Ok(gui::run(provider).await?),
        Mode::Terminal => {
            let save = args.save.then_some(config.transcript_path.as_path());
            let input = BufReader::new(tokio::io::stdin());
            let mut output = std::io::stdout();
            terminal::run(provider.as_ref(), input, &mut output, save).await?;
            Ok(())
        }
    }
}
