use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::OptionSet;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        render_empty(frame, area, app.raw_quiz());
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], &question.question);
    render_options(
        frame,
        chunks[2],
        &question.options,
        app.selected_option(),
        app.session.responses.get(&app.question_index()).copied(),
    );
    render_answered(frame, chunks[3], app);
}

fn render_empty(frame: &mut Frame, area: Rect, raw: Option<&str>) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No quiz yet.",
            Style::default().fg(Color::Gray).bold(),
        )),
        Line::from(Span::styled(
            "Generate one from the Upload page.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    // The last reply could not be parsed; show it as-is.
    if let Some(raw) = raw {
        lines.push(Line::from(""));
        lines.extend(
            raw.lines()
                .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::Yellow)))),
        );
    }

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!("{}/{}", app.question_index() + 1, app.session.quiz.len());
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &OptionSet,
    selected: usize,
    chosen: Option<char>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, (key, text)) in options.iter().enumerate() {
        let is_selected = index == selected;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else if chosen == Some(key) {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        let check = if chosen == Some(key) { "*" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {}{} ", marker, check), style),
            Span::styled(format!("{}) ", key.to_ascii_uppercase()), style),
            Span::styled(text, style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_answered(frame: &mut Frame, area: Rect, app: &App) {
    let answered = app.session.responses.len();
    let total = app.session.quiz.len();
    let text = if app.session.submitted() {
        "Submitted.".to_string()
    } else {
        format!("{answered} of {total} answered")
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
