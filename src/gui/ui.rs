use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Text},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use super::app::{GuiApp, PLACEHOLDER, TITLE};
use crate::transcript::Speaker;

pub fn render(app: &GuiApp, frame: &mut Frame) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Conversation
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Status
        ])
        .split(frame.area());

    render_conversation(app, frame, layout[0]);

    let input = if app.input.is_empty() {
        Paragraph::new(PLACEHOLDER).fg(Color::DarkGray)
    } else {
        Paragraph::new(format!("> {}", app.input)).fg(Color::Yellow)
    };
    frame.render_widget(
        input.block(
            Block::bordered()
                .title("Send")
                .border_type(BorderType::Rounded),
        ),
        layout[1],
    );

    let status = Paragraph::new(app.status())
        .alignment(Alignment::Center)
        .fg(if app.pending { Color::Magenta } else { Color::Gray });
    frame.render_widget(status, layout[2]);
}

fn render_conversation(app: &GuiApp, frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .title(TITLE)
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);

    let mut rows: Vec<Line> = Vec::new();
    for line in &app.lines {
        let style = line_style(line);
        for chunk in wrap(line, inner.width as usize) {
            rows.push(Line::styled(chunk, style));
        }
    }

    // Pin to the bottom, then back off by the scroll offset
    let height = inner.height as usize;
    let max_top = rows.len().saturating_sub(height);
    let top = max_top.saturating_sub(app.scroll_back as usize);
    let visible: Vec<Line> = rows.into_iter().skip(top).take(height).collect();

    frame.render_widget(Paragraph::new(Text::from(visible)).block(block), area);
}

fn line_style(line: &str) -> Style {
    match Speaker::of(line) {
        Speaker::User => Style::default().fg(Color::Green),
        Speaker::Ai => Style::default().fg(Color::Cyan),
        Speaker::Error => Style::default().fg(Color::Red),
        Speaker::Other => Style::default(),
    }
}

/// Split `line` into chunks of at most `width` characters
fn wrap(line: &str, width: usize) -> Vec<String> {
    if width == 0 || line.is_empty() {
        return vec![line.to_string()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}
