use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;

const EXCERPT_LINES: usize = 12;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .margin(1)
    .split(area);

    render_intro(frame, chunks[0]);
    render_path_field(frame, chunks[1], app.upload_input());
    render_document(frame, chunks[2], app);
    render_excerpt(frame, chunks[3], app.session.course_text.as_deref());
}

fn render_intro(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "Course upload",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            "Load a PDF, then press Enter on an empty field to generate a quiz.",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(content), area);
}

fn render_path_field(frame: &mut Frame, area: Rect, input: &str) {
    let widget = Paragraph::new(Line::from(vec![
        Span::styled(input, Style::default().fg(Color::White)),
        Span::styled("_", Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(" PDF path ")
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_document(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.session.document {
        Some(path) => Line::from(vec![
            Span::styled("Document: ", Style::default().fg(Color::DarkGray)),
            Span::styled(path.display().to_string(), Style::default().fg(Color::Green)),
        ]),
        None => Line::from(Span::styled(
            "No document loaded.",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_excerpt(frame: &mut Frame, area: Rect, text: Option<&str>) {
    let Some(text) = text else {
        return;
    };

    let lines: Vec<Line> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(EXCERPT_LINES)
        .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::Gray))))
        .collect();

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Extracted text ")
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
