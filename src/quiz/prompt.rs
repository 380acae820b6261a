use super::parser::ANSWER_MARKER;

/// Number of questions requested when nothing else is configured.
pub const DEFAULT_QUESTION_COUNT: usize = 3;

/// Characters of course text sent to the model when nothing else is configured.
pub const DEFAULT_EXCERPT_CHARS: usize = 2000;

/// Build the quiz-generation prompt for a course text.
///
/// Only the first `excerpt_chars` characters of the course are included.
/// The model is told to end every question with [`ANSWER_MARKER`] so the
/// reply can go straight to [`parse`](super::parse).
pub fn quiz_prompt(course_text: &str, question_count: usize, excerpt_chars: usize) -> String {
    let excerpt: String = course_text.chars().take(excerpt_chars).collect();
    format!(
        "Tu es un professeur. Génère {question_count} questions à choix multiples (QCM) \
         à partir de ce texte de cours.\n\
         Chaque question doit avoir 4 options (a, b, c, d) et indique la bonne réponse \
         à la fin en disant \"{ANSWER_MARKER} x\".\n\n\
         Contenu du cours :\n{excerpt}\n"
    )
}
