use std::fs;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone};
use course_quiz::{
    App, AppEvent, CompletionError, CompletionService, Effect, ExtractError, Page, QuizConfig,
    Services, Store, TextExtractor, Trigger, execute,
};

const REPLY: &str = "\
Quelle couleur a le ciel ?
a) Vert
b) Bleu
Réponse correcte : b
Combien font 2 + 2 ?
a) 4
b) 5
Réponse correcte : a";

struct FixedText(&'static str);

impl TextExtractor for FixedText {
    fn extract(&self, _data: &[u8]) -> Result<String, ExtractError> {
        Ok(self.0.to_string())
    }
}

/// Replays a canned reply and keeps the prompts it was given.
struct ScriptedModel {
    reply: Result<&'static str, &'static str>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn replying(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

impl CompletionService for ScriptedModel {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .map(str::to_string)
            .map_err(|message| CompletionError::RequestFailed {
                message: message.to_string(),
            })
    }
}

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 10, 18, 14, 5, 0).unwrap()
}

fn services(root: &std::path::Path, model: Arc<ScriptedModel>) -> Services {
    Services {
        store: Store::open(root).unwrap(),
        extractor: Arc::new(FixedText("Le ciel est bleu. Deux et deux font quatre.")),
        completion: model,
        quiz: QuizConfig::default(),
    }
}

#[test]
fn test_full_session() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("cours.pdf");
    fs::write(&source, b"%PDF-1.4 fake").unwrap();

    let model = ScriptedModel::replying(REPLY);
    let services = services(&dir.path().join("data"), model.clone());
    let mut app = App::new();

    for c in source.display().to_string().chars() {
        app.input_push(c);
    }
    let effect = app.upload_confirm().unwrap();
    assert_eq!(effect, Effect::StoreDocument { source: source.clone() });

    let event = execute(&services, effect, now());
    assert!(matches!(event, AppEvent::DocumentStored { .. }));
    assert_eq!(app.handle_event(event), None);
    let stored = app.session.document.clone().unwrap();
    assert_eq!(fs::read(&stored).unwrap(), b"%PDF-1.4 fake");

    let effect = app.upload_confirm().unwrap();
    assert!(matches!(effect, Effect::GenerateQuiz { .. }));
    let event = execute(&services, effect, now());
    assert_eq!(app.handle_event(event), None);
    assert_eq!(app.page, Page::Answer);
    assert_eq!(app.session.quiz.len(), 2);
    assert!(model.prompts.lock().unwrap()[0].contains("Le ciel est bleu."));

    // Right on the first question, wrong on the second.
    app.select_next_option();
    app.choose_option();
    app.select_next_option();
    app.choose_option();

    let effect = app.submit(now()).unwrap();
    assert_eq!(app.page, Page::Dashboard);
    assert_eq!(app.session.grade.as_ref().unwrap().score, 1);
    assert_eq!(app.submit(now()), None);

    let event = execute(&services, effect, now());
    assert_eq!(event, AppEvent::ResultRecorded);
    let reload = app.handle_event(event).unwrap();
    assert_eq!(reload, Effect::LoadHistory);

    let results = services.store.load_results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 1);
    assert_eq!(results[0].total, 2);
    assert_eq!(
        results[0].doc.as_deref(),
        Some(stored.display().to_string().as_str())
    );

    app.handle_event(execute(&services, reload, now()));
    assert_eq!(app.tallies().len(), 2);
    assert_eq!((app.tallies()[0].correct, app.tallies()[0].wrong), (1, 0));
    assert_eq!((app.tallies()[1].correct, app.tallies()[1].wrong), (0, 1));
    assert_eq!(app.history().len(), 2);
    assert_eq!(app.history()[1].answer, 'b');
}

#[test]
fn test_missing_source_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let services = services(dir.path(), ScriptedModel::replying(REPLY));

    let event = execute(
        &services,
        Effect::StoreDocument {
            source: dir.path().join("absent.pdf"),
        },
        now(),
    );
    assert!(matches!(event, AppEvent::Failed { .. }));

    let mut app = App::new();
    app.handle_event(event);
    assert!(app.status().unwrap().text.contains("absent.pdf"));
    assert!(app.session.document.is_none());
}

#[test]
fn test_chat_failure_keeps_the_question() {
    let dir = tempfile::tempdir().unwrap();
    let services = services(dir.path(), ScriptedModel::failing("connection refused"));
    let mut app = App::new();
    app.transition(Trigger::Navigate(Page::Chat));

    for c in "Qu'est-ce qu'un atome ?".chars() {
        app.input_push(c);
    }
    let effect = app.ask().unwrap();
    let event = execute(&services, effect, now());
    match &event {
        AppEvent::ChatAnswered { question, answer } => {
            assert_eq!(question, "Qu'est-ce qu'un atome ?");
            assert!(answer.as_ref().unwrap_err().contains("connection refused"));
        }
        other => panic!("unexpected event {other:?}"),
    }

    app.handle_event(event);
    assert_eq!(app.transcript().len(), 1);
    assert_eq!(app.chat_input(), "");
}

#[test]
fn test_failed_generation_saves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let services = services(dir.path(), ScriptedModel::failing("timeout"));

    let event = execute(
        &services,
        Effect::GenerateQuiz {
            course_text: "texte".to_string(),
        },
        now(),
    );
    assert!(matches!(event, AppEvent::Failed { .. }));
    assert_eq!(fs::read_dir(services.store.quizzes_dir()).unwrap().count(), 0);
}

#[test]
fn test_history_with_dangling_quiz_reference() {
    let dir = tempfile::tempdir().unwrap();
    let services = services(dir.path(), ScriptedModel::replying(REPLY));

    let mut app = App::new();
    app.handle_event(execute(
        &services,
        Effect::GenerateQuiz {
            course_text: "texte".to_string(),
        },
        now(),
    ));
    app.choose_option();
    let record = app.submit(now()).unwrap();
    execute(&services, record, now());

    fs::remove_dir_all(services.store.quizzes_dir()).unwrap();
    match execute(&services, Effect::LoadHistory, now()) {
        AppEvent::HistoryLoaded { rows, tallies } => {
            assert_eq!(rows.len(), 1);
            assert!(tallies.is_empty());
        }
        other => panic!("unexpected event {other:?}"),
    }
}
