use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::truncate;
use crate::app::App;

const QUIZ_PATH_LENGTH: usize = 40;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)])
        .margin(1)
        .split(area);

    let header = Line::from(Span::styled(
        format!(
            "{:<20} {:<43} {:<9} {}",
            "Timestamp", "Quiz", "Question", "Answer"
        ),
        Style::default().fg(Color::Cyan).bold(),
    ));
    let widget = Paragraph::new(header).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[0]);

    if app.history().is_empty() {
        let widget = Paragraph::new("No recorded answers yet.")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);
        frame.render_widget(widget, chunks[1]);
        return;
    }

    let lines: Vec<Line> = app
        .history()
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(
                    format!("{:<20} ", row.timestamp),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<43} ", truncate(&row.quiz, QUIZ_PATH_LENGTH)),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("{:<9} ", row.question),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    row.answer.to_ascii_uppercase().to_string(),
                    Style::default().fg(Color::Cyan).bold(),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).scroll((app.scroll() as u16, 0));
    frame.render_widget(widget, chunks[1]);
}
