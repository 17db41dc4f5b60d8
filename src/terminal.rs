//! Interactive terminal loop

use std::io::Write;
use std::path::Path;

use crossterm::style::Stylize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};

use crate::llm::ChatProvider;
use crate::transcript::{Transcript, AI_PREFIX, ERROR_PREFIX, USER_PREFIX};

/// Read prompts from `input` until `exit`, `quit` or end of input
///
/// Every turn is appended to the returned transcript. With `save` set, the
/// lines of each turn are appended to that file as soon as the turn ends.
pub async fn run<R, W>(
    provider: &dyn ChatProvider,
    input: R,
    output: &mut W,
    save: Option<&Path>,
) -> std::io::Result<Transcript>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut transcript = Transcript::new();

    loop {
        write!(output, "{}", USER_PREFIX.green())?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            break;
        };
        let prompt = line.trim();
        if prompt == "exit" || prompt == "quit" {
            break;
        }
        if prompt.is_empty() {
            continue;
        }

        let start = transcript.len();
        transcript.push_user(prompt);

        match provider.complete(prompt).await {
            Ok(reply) => {
                writeln!(output, "{}", format!("{}{}", AI_PREFIX, reply).cyan())?;
                transcript.push_ai(&reply);
            }
            Err(e) => {
                error!(error = %e, "chat request failed");
                writeln!(output, "{}", format!("{}{}", ERROR_PREFIX, e).red())?;
                transcript.push_error(&e.to_string());
            }
        }

        if let Some(path) = save {
            if let Err(e) = transcript.append_to_file(path, start) {
                error!(path = %path.display(), error = %e, "failed to save conversation");
            }
        }
    }

    info!(lines = transcript.len(), "terminal session ended");
    Ok(transcript)
}
