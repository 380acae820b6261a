use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(3)])
        .margin(1)
        .split(area);

    render_transcript(frame, chunks[0], app);

    let widget = Paragraph::new(Line::from(vec![
        Span::styled(app.chat_input(), Style::default().fg(Color::White)),
        Span::styled("_", Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(" Question ")
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, chunks[1]);
}

fn render_transcript(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    for turn in app.transcript() {
        lines.push(Line::from(vec![
            Span::styled("you  ", Style::default().fg(Color::Cyan).bold()),
            Span::styled(turn.question.as_str(), Style::default().fg(Color::White)),
        ]));
        match &turn.answer {
            Ok(answer) => {
                for (i, text) in answer.lines().enumerate() {
                    let who = if i == 0 { "bot  " } else { "     " };
                    lines.push(Line::from(vec![
                        Span::styled(who, Style::default().fg(Color::Green).bold()),
                        Span::styled(text, Style::default().fg(Color::Gray)),
                    ]));
                }
            }
            Err(message) => lines.push(Line::from(Span::styled(
                format!("     error: {message}"),
                Style::default().fg(Color::Red),
            ))),
        }
        lines.push(Line::from(""));
    }

    // Keep the latest turn in view.
    let height = area.height.saturating_sub(2) as usize;
    let offset = lines.len().saturating_sub(height);

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset as u16, 0))
        .block(
            Block::default()
                .title(" Chat ")
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}
