mod answer;
mod chat;
mod dashboard;
mod history;
mod upload;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, StatusKind};
use crate::models::Page;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_navigation(frame, chunks[0], app.page);

    match app.page {
        Page::Upload => upload::render(frame, chunks[1], app),
        Page::Answer => answer::render(frame, chunks[1], app),
        Page::Dashboard => dashboard::render(frame, chunks[1], app),
        Page::Chat => chat::render(frame, chunks[1], app),
        Page::History => history::render(frame, chunks[1], app),
    }

    render_status(frame, chunks[2], app);
    render_controls(frame, chunks[3], app.page);
}

fn render_navigation(frame: &mut Frame, area: Rect, current: Page) {
    let mut spans = vec![Span::styled(
        " COURSE QUIZ  ",
        Style::default().fg(Color::Cyan).bold(),
    )];

    for (index, page) in Page::ALL.iter().enumerate() {
        let style = if *page == current {
            Style::default().fg(Color::Cyan).bold().underlined()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} {} ", index + 1, page.title()), style));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(job) = app.busy() {
        Line::from(Span::styled(
            format!(" {}...", job.label()),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(status) = app.status() {
        let color = match status.kind {
            StatusKind::Info => Color::Green,
            StatusKind::Error => Color::Red,
        };
        Line::from(Span::styled(format!(" {}", status.text), Style::default().fg(color)))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_controls(frame: &mut Frame, area: Rect, page: Page) {
    let hint = match page {
        Page::Upload => "type a PDF path · enter load / generate · tab pages · esc quit",
        Page::Answer => "j/k option · h/l question · enter choose · s submit · tab pages · esc quit",
        Page::Dashboard | Page::History => "j/k scroll · tab pages · esc quit",
        Page::Chat => "type a question · enter send · tab pages · esc quit",
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

/// Shorten to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let truncated: String = text.chars().take(max).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("élémentaire", 4), "élém...");
    }
}
