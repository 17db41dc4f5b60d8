//! Full-screen chat window

pub mod app;
pub mod ui;

use std::io;
use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::{Stream, StreamExt};
use tracing::{error, info};

use crate::llm::ChatProvider;
pub use app::{Action, GuiApp};

/// Take over the terminal until the user quits
pub async fn run(provider: Arc<dyn ChatProvider>) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let mut app = GuiApp::new();
    info!("chat window opened");

    let result = drive(&mut app, EventStream::new(), provider.as_ref(), |app| {
        terminal.draw(|frame| ui::render(app, frame)).map(|_| ())
    })
    .await;

    ratatui::restore();
    info!("chat window closed");
    result
}

/// Feed key events to `app` until it quits or `events` ends
///
/// While a reply is pending, keys are still read: scrolling and quitting
/// work, edits and submits are dropped. `draw` is called after every change.
pub async fn drive<S, D>(
    app: &mut GuiApp,
    mut events: S,
    provider: &dyn ChatProvider,
    mut draw: D,
) -> io::Result<()>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
    D: FnMut(&GuiApp) -> io::Result<()>,
{
    loop {
        draw(&*app)?;

        let Some(key) = next_key(&mut events).await? else {
            return Ok(());
        };

        let prompt = match app.handle_key(key) {
            Action::Submit(prompt) => prompt,
            Action::Quit => return Ok(()),
            Action::None => continue,
        };

        app.begin_turn(&prompt);
        draw(&*app)?;

        let request = provider.complete(&prompt);
        tokio::pin!(request);
        let mut events_done = false;

        let result = loop {
            tokio::select! {
                result = &mut request => break result,
                key = next_key(&mut events), if !events_done => match key? {
                    Some(key) => {
                        if app.handle_key(key) == Action::Quit {
                            return Ok(());
                        }
                        draw(&*app)?;
                    }
                    None => events_done = true,
                },
            }
        };

        if let Err(e) = &result {
            error!(error = %e, "chat request failed");
        }
        app.finish_turn(result);

        if events_done {
            draw(&*app)?;
            return Ok(());
        }
    }
}

/// Next key press, skipping releases, repeats and non-key events
async fn next_key<S>(events: &mut S) -> io::Result<Option<KeyEvent>>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    while let Some(event) = events.next().await {
        if let Event::Key(key) = event? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}
