use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use super::truncate;
use crate::app::App;
use crate::models::QuizQuestion;
use crate::quiz::{Grade, Outcome, QuestionTally};

const QUESTION_PREVIEW_LENGTH: usize = 55;
const BAR_WIDTH: usize = 30;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(app.tallies().len().min(8) as u16 + 3),
    ])
    .margin(1)
    .split(area);

    match &app.session.grade {
        Some(grade) => {
            render_score_summary(frame, chunks[0], grade);
            render_question_breakdown(frame, chunks[1], app, grade);
        }
        None => render_not_submitted(frame, chunks[0]),
    }
    render_tallies(frame, chunks[2], app.tallies());
}

fn grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_not_submitted(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No answers submitted in this session.",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_score_summary(frame: &mut Frame, area: Rect, grade: &Grade) {
    let percentage = grade.percentage();
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.0}%)", grade.score, grade.total, percentage),
            Style::default().fg(grade_color(percentage)).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App, grade: &Grade) {
    let lines: Vec<Line> = grade
        .outcomes
        .iter()
        .zip(app.session.quiz.iter())
        .map(|(outcome, question)| {
            let (symbol, color) = if outcome.is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", outcome.index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate(&question.question, QUESTION_PREVIEW_LENGTH),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(answer_note(outcome, question), Style::default().fg(color)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.scroll() as u16, 0));
    frame.render_widget(widget, area);
}

fn letter(key: Option<char>) -> String {
    key.map_or("-".to_string(), |c| c.to_ascii_uppercase().to_string())
}

/// The given letter, followed by the right option when it differs.
fn answer_note(outcome: &Outcome, question: &QuizQuestion) -> String {
    if outcome.is_correct {
        return format!("  {}", letter(outcome.given));
    }
    match question.correct_text() {
        Some(text) => format!(
            "  {} · answer {}) {}",
            letter(outcome.given),
            letter(outcome.correct),
            text
        ),
        None => format!("  {} · answer {}", letter(outcome.given), letter(outcome.correct)),
    }
}

fn render_tallies(frame: &mut Frame, area: Rect, tallies: &[QuestionTally]) {
    let block = Block::default()
        .title(" All attempts ")
        .borders(Borders::TOP)
        .border_style(Color::DarkGray)
        .padding(Padding::horizontal(1));

    if tallies.is_empty() {
        let widget = Paragraph::new(Span::styled(
            "No recorded answers yet.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(widget, area);
        return;
    }

    let lines: Vec<Line> = tallies.iter().map(tally_line).collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn tally_line(tally: &QuestionTally) -> Line<'static> {
    let answered = tally.correct + tally.wrong;
    let filled = if answered > 0 {
        tally.correct * BAR_WIDTH / answered
    } else {
        0
    };

    Line::from(vec![
        Span::styled(format!("{:<4}", tally.label()), Style::default().fg(Color::Gray)),
        Span::styled("█".repeat(filled), Style::default().fg(Color::Green)),
        Span::styled("░".repeat(BAR_WIDTH - filled), Style::default().fg(Color::Red)),
        Span::styled(
            format!("  {} correct · {} wrong", tally.correct, tally.wrong),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}
