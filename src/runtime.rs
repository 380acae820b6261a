//! Event loop: draws the UI, reads keys and runs controller effects on
//! blocking worker threads.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;

use crate::QuizError;
use crate::app::{App, AppEvent, Effect, Job};
use crate::config::QuizConfig;
use crate::data::Store;
use crate::input;
use crate::quiz::{history_rows, parse, quiz_prompt, tally};
use crate::services::{CompletionService, TextExtractor};
use crate::terminal::Tui;
use crate::ui;

const TICK: Duration = Duration::from_millis(100);

/// Everything an [`Effect`] may need.
pub struct Services {
    pub store: Store,
    pub extractor: Arc<dyn TextExtractor>,
    pub completion: Arc<dyn CompletionService>,
    pub quiz: QuizConfig,
}

/// Carry out one effect synchronously and describe the outcome.
pub fn execute(services: &Services, effect: Effect, now: DateTime<Local>) -> AppEvent {
    match effect {
        Effect::StoreDocument { source } => store_document(services, &source, now),
        Effect::GenerateQuiz { course_text } => generate_quiz(services, &course_text, now),
        Effect::RecordResult(entry) => match services.store.append_result(entry) {
            Ok(()) => AppEvent::ResultRecorded,
            Err(e) => failed(Job::Results, e),
        },
        Effect::LoadHistory => load_history(services),
        Effect::Ask { question } => {
            let answer = services.completion.complete(&question).map_err(|e| {
                tracing::warn!(error = %e, "chat completion failed");
                e.to_string()
            });
            AppEvent::ChatAnswered { question, answer }
        }
    }
}

fn failed(job: Job, error: impl std::fmt::Display) -> AppEvent {
    tracing::warn!(?job, error = %error, "job failed");
    AppEvent::Failed {
        job,
        message: error.to_string(),
    }
}

fn store_document(services: &Services, source: &Path, now: DateTime<Local>) -> AppEvent {
    let bytes = match fs::read(source) {
        Ok(bytes) => bytes,
        Err(e) => return failed(Job::Document, format!("cannot open {}: {e}", source.display())),
    };

    let path = match services.store.store_document(&bytes, now) {
        Ok(path) => path,
        Err(e) => return failed(Job::Document, e),
    };

    match services.extractor.extract(&bytes) {
        Ok(text) => AppEvent::DocumentStored { path, text },
        Err(e) => failed(Job::Document, e),
    }
}

fn generate_quiz(services: &Services, course_text: &str, now: DateTime<Local>) -> AppEvent {
    let prompt = quiz_prompt(
        course_text,
        services.quiz.question_count,
        services.quiz.excerpt_chars,
    );

    let raw = match services.completion.complete(&prompt) {
        Ok(raw) => raw,
        Err(e) => return failed(Job::Quiz, e),
    };

    let quiz = parse(&raw);
    match services.store.save_quiz(&quiz, now) {
        Ok(path) => AppEvent::QuizGenerated { quiz, path, raw },
        Err(e) => failed(Job::Quiz, e),
    }
}

fn load_history(services: &Services) -> AppEvent {
    let results = match services.store.load_results() {
        Ok(results) => results,
        Err(e) => return failed(Job::Results, e),
    };

    let tallies = tally(&results, |path| {
        match services.store.load_quiz(Path::new(path)) {
            Ok(quiz) => quiz,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable quiz");
                None
            }
        }
    });

    AppEvent::HistoryLoaded {
        rows: history_rows(&results),
        tallies,
    }
}

/// Run the terminal UI until the user quits.
pub async fn run(services: Services) -> Result<(), QuizError> {
    let services = Arc::new(services);
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut app = App::new();

    let mut tui = Tui::enter()?;
    let result: Result<(), QuizError> = loop {
        while let Ok(event) = rx.try_recv() {
            if let Some(effect) = app.handle_event(event) {
                dispatch(&services, &tx, effect);
            }
        }

        if let Err(e) = tui.draw(|frame| ui::render(frame, &app)) {
            break Err(e.into());
        }

        match event::poll(TICK) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => break Err(e.into()),
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if let Some(effect) = input::handle_key(&mut app, key) {
                    dispatch(&services, &tx, effect);
                }
            }
            Ok(_) => {}
            Err(e) => break Err(e.into()),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    tui.exit()?;
    result
}

fn dispatch(services: &Arc<Services>, tx: &mpsc::UnboundedSender<AppEvent>, effect: Effect) {
    let services = Arc::clone(services);
    let tx = tx.clone();
    tokio::task::spawn_blocking(move || {
        let event = execute(&services, effect, Local::now());
        // The loop only stops listening once the app is quitting.
        let _ = tx.send(event);
    });
}
