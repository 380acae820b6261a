//! Application controller.
//!
//! [`App`] owns the session and the per-page view state. It never touches
//! the disk or the network: actions that need I/O return an [`Effect`] for
//! the runtime to carry out, and the outcome comes back as an [`AppEvent`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::data::result_timestamp;
use crate::models::{Page, QuizQuestion, ResultEntry, Trigger};
use crate::quiz::{Grade, HistoryRow, QuestionTally, grade};

/// Work the runtime performs on behalf of the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Copy a PDF into the store and extract its text.
    StoreDocument { source: PathBuf },
    /// Prompt the model with the course text, parse and store the quiz.
    GenerateQuiz { course_text: String },
    /// Append a graded attempt to the results log.
    RecordResult(ResultEntry),
    /// Reload results and per-question statistics.
    LoadHistory,
    /// Free-form chat prompt.
    Ask { question: String },
}

/// Background jobs; at most one runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Document,
    Quiz,
    Chat,
    Results,
}

impl Job {
    pub fn label(self) -> &'static str {
        match self {
            Job::Document => "Extracting text",
            Job::Quiz => "Generating quiz",
            Job::Chat => "Waiting for the model",
            Job::Results => "Loading results",
        }
    }
}

/// Outcome of an [`Effect`].
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    DocumentStored {
        path: PathBuf,
        text: String,
    },
    QuizGenerated {
        quiz: Vec<QuizQuestion>,
        path: PathBuf,
        raw: String,
    },
    ResultRecorded,
    HistoryLoaded {
        rows: Vec<HistoryRow>,
        tallies: Vec<QuestionTally>,
    },
    ChatAnswered {
        question: String,
        answer: Result<String, String>,
    },
    Failed {
        job: Job,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// What the user is working on: the stored document, its quiz and answers.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub document: Option<PathBuf>,
    pub course_text: Option<String>,
    pub quiz: Vec<QuizQuestion>,
    pub quiz_path: Option<PathBuf>,
    pub responses: BTreeMap<usize, char>,
    pub grade: Option<Grade>,
}

impl Session {
    pub fn submitted(&self) -> bool {
        self.grade.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub question: String,
    pub answer: Result<String, String>,
}

#[derive(Debug, Default)]
pub struct App {
    pub page: Page,
    pub session: Session,
    upload_input: String,
    raw_quiz: Option<String>,
    chat_input: String,
    transcript: Vec<ChatTurn>,
    question_index: usize,
    selected_option: usize,
    history: Vec<HistoryRow>,
    tallies: Vec<QuestionTally>,
    scroll: usize,
    status: Option<Status>,
    busy: Option<Job>,
    /// A submitted attempt is being written to the results log.
    recording: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn busy(&self) -> Option<Job> {
        self.busy
    }

    pub fn upload_input(&self) -> &str {
        &self.upload_input
    }

    pub fn chat_input(&self) -> &str {
        &self.chat_input
    }

    pub fn raw_quiz(&self) -> Option<&str> {
        self.raw_quiz.as_deref()
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn history(&self) -> &[HistoryRow] {
        &self.history
    }

    pub fn tallies(&self) -> &[QuestionTally] {
        &self.tallies
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.session.quiz.get(self.question_index)
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }

    /// Claim the single job slot, or explain why not.
    fn start(&mut self, job: Job) -> bool {
        if let Some(running) = self.busy {
            self.info(format!("{} - please wait", running.label()));
            return false;
        }
        self.busy = Some(job);
        self.status = None;
        true
    }

    fn finish(&mut self, job: Job) {
        if self.busy == Some(job) {
            self.busy = None;
        }
    }

    /// Apply a page trigger. Entering the statistics pages reloads them.
    pub fn transition(&mut self, trigger: Trigger) -> Option<Effect> {
        let previous = self.page;
        self.page = self.page.on(trigger);
        if self.page == previous {
            return None;
        }

        self.scroll = 0;
        let page = self.page;
        match page {
            Page::Dashboard | Page::History if self.start(Job::Results) => {
                Some(Effect::LoadHistory)
            }
            _ => None,
        }
    }

    /// Type into the text field of the current page.
    pub fn input_push(&mut self, c: char) {
        match self.page {
            Page::Upload => self.upload_input.push(c),
            Page::Chat => self.chat_input.push(c),
            _ => {}
        }
    }

    pub fn input_pop(&mut self) {
        match self.page {
            Page::Upload => {
                self.upload_input.pop();
            }
            Page::Chat => {
                self.chat_input.pop();
            }
            _ => {}
        }
    }

    /// Enter on the upload page: load the typed path, or generate a quiz from
    /// the loaded document when the field is empty.
    pub fn upload_confirm(&mut self) -> Option<Effect> {
        let path = self.upload_input.trim();
        if !path.is_empty() {
            let source = PathBuf::from(path);
            if !self.start(Job::Document) {
                return None;
            }
            return Some(Effect::StoreDocument { source });
        }

        let Some(course_text) = self.session.course_text.clone() else {
            self.error("Type the path of a course PDF first.");
            return None;
        };
        if course_text.trim().is_empty() {
            self.error("No text could be extracted from this document.");
            return None;
        }
        if !self.start(Job::Quiz) {
            return None;
        }
        Some(Effect::GenerateQuiz { course_text })
    }

    /// Enter on the chat page.
    pub fn ask(&mut self) -> Option<Effect> {
        let question = self.chat_input.trim().to_string();
        if question.is_empty() || !self.start(Job::Chat) {
            return None;
        }
        self.chat_input.clear();
        Some(Effect::Ask { question })
    }

    pub fn next_question(&mut self) {
        if self.question_index + 1 < self.session.quiz.len() {
            self.question_index += 1;
            self.sync_selection();
        }
    }

    pub fn previous_question(&mut self) {
        if self.question_index > 0 {
            self.question_index -= 1;
            self.sync_selection();
        }
    }

    /// Point the option cursor at the recorded answer, if any.
    fn sync_selection(&mut self) {
        self.selected_option = self
            .current_question()
            .and_then(|q| {
                let given = self.session.responses.get(&self.question_index)?;
                q.options.position(*given)
            })
            .unwrap_or(0);
    }

    pub fn select_next_option(&mut self) {
        let count = self.current_question().map_or(0, |q| q.options.len());
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.current_question().map_or(0, |q| q.options.len());
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// Record the highlighted option for the current question and move on.
    pub fn choose_option(&mut self) {
        if self.session.submitted() {
            self.info("Answers already submitted. Generate a new quiz to try again.");
            return;
        }
        let Some(key) = self
            .current_question()
            .and_then(|q| q.options.key_at(self.selected_option))
        else {
            return;
        };

        self.session.responses.insert(self.question_index, key);
        self.next_question();
    }

    /// Grade the answers, record the attempt and show the dashboard.
    pub fn submit(&mut self, now: DateTime<Local>) -> Option<Effect> {
        if self.session.quiz.is_empty() {
            self.error("No quiz to submit yet.");
            return None;
        }
        if self.session.submitted() {
            self.info("Answers already submitted.");
            return None;
        }
        if !self.start(Job::Results) {
            return None;
        }

        let grade = grade(&self.session.quiz, &self.session.responses);
        let entry = ResultEntry {
            timestamp: result_timestamp(now),
            doc: self.session.document.as_ref().map(|p| p.display().to_string()),
            quiz: self.session.quiz_path.as_ref().map(|p| p.display().to_string()),
            score: grade.score,
            total: grade.total,
            responses: self.session.responses.clone(),
        };
        tracing::info!(score = grade.score, total = grade.total, "answers submitted");

        self.session.grade = Some(grade);
        self.recording = true;
        self.page = self.page.on(Trigger::AnswersSubmitted);
        self.scroll = 0;
        Some(Effect::RecordResult(entry))
    }

    pub fn scroll_down(&mut self, max: usize) {
        self.scroll = (self.scroll + 1).min(max.saturating_sub(1));
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Fold a finished effect back into the state.
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Effect> {
        match event {
            AppEvent::DocumentStored { path, text } => {
                self.finish(Job::Document);
                self.upload_input.clear();
                self.info(format!(
                    "Saved as {} ({} characters). Press Enter to generate the quiz.",
                    path.display(),
                    text.chars().count()
                ));
                self.session.document = Some(path);
                self.session.course_text = Some(text);
                None
            }
            AppEvent::QuizGenerated { quiz, path, raw } => {
                self.finish(Job::Quiz);
                self.raw_quiz = Some(raw);
                self.question_index = 0;
                self.selected_option = 0;
                self.session.responses.clear();
                self.session.grade = None;
                self.session.quiz_path = Some(path.clone());

                if quiz.is_empty() {
                    self.session.quiz = quiz;
                    self.error("The model's reply contained no recognisable question.");
                    return None;
                }

                self.info(format!(
                    "{} questions saved to {}",
                    quiz.len(),
                    path.display()
                ));
                self.session.quiz = quiz;
                self.transition(Trigger::QuizGenerated)
            }
            AppEvent::ResultRecorded => {
                self.finish(Job::Results);
                self.recording = false;
                let reload = self.start(Job::Results).then_some(Effect::LoadHistory);
                self.info("Result saved.");
                reload
            }
            AppEvent::HistoryLoaded { rows, tallies } => {
                self.finish(Job::Results);
                self.history = rows;
                self.tallies = tallies;
                None
            }
            AppEvent::ChatAnswered { question, answer } => {
                self.finish(Job::Chat);
                self.transcript.push(ChatTurn { question, answer });
                self.scroll = 0;
                None
            }
            AppEvent::Failed { job, message } => {
                self.finish(job);
                if job == Job::Results && self.recording {
                    // Unsaved attempt: let the user submit it again.
                    self.recording = false;
                    self.session.grade = None;
                    self.page = Page::Answer;
                    self.error(format!("{message}. Press s to submit again."));
                    return None;
                }
                self.error(message);
                None
            }
        }
    }
}
