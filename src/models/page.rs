/// Pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Pick a course PDF and generate a quiz from it.
    #[default]
    Upload,
    /// Answer the current quiz.
    Answer,
    /// Score breakdown and statistics.
    Dashboard,
    /// Free-form questions to the model.
    Chat,
    /// Every recorded response.
    History,
}

/// What caused a page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Explicit navigation to a page.
    Navigate(Page),
    /// Next page in navigation order.
    Next,
    /// Previous page in navigation order.
    Previous,
    /// A quiz was generated and stored.
    QuizGenerated,
    /// The user submitted their answers.
    AnswersSubmitted,
}

impl Page {
    /// Navigation order, as shown in the header.
    pub const ALL: [Page; 5] = [
        Page::Upload,
        Page::Answer,
        Page::Dashboard,
        Page::Chat,
        Page::History,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Upload => "Upload",
            Page::Answer => "Answer",
            Page::Dashboard => "Dashboard",
            Page::Chat => "Chat",
            Page::History => "History",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// The page reached from `self` when `trigger` fires.
    pub fn on(self, trigger: Trigger) -> Page {
        let count = Self::ALL.len();
        match trigger {
            Trigger::Navigate(page) => page,
            Trigger::Next => Self::ALL[(self.index() + 1) % count],
            Trigger::Previous => Self::ALL[(self.index() + count - 1) % count],
            Trigger::QuizGenerated => Page::Answer,
            Trigger::AnswersSubmitted => Page::Dashboard,
        }
    }
}
