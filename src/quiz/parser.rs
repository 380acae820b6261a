//! Turns the free-form text returned by the model into quiz records.
//!
//! The text is a sequence of blocks: a question stem, options `a)` to `d)`,
//! then [`ANSWER_MARKER`] followed by the letter of the correct option.
//! Splitting on the marker gives one fragment per question; the letter for
//! fragment `i` sits at the start of fragment `i + 1`.
//!
//! Parsing never fails. Fragments without an `a)` marker are skipped, and an
//! unrecognised answer letter falls back to the first option.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{OptionSet, QuizQuestion};

/// Literal that precedes the correct option's letter.
pub const ANSWER_MARKER: &str = "Réponse correcte :";

/// First option marker; everything before it is the stem.
static STEM_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[aA]\)|a\.)").expect("stem pattern is valid"));

static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-dA-D])\)([^\n]+)").expect("option pattern is valid"));

/// Parse every complete question block in `raw`, in source order.
pub fn parse(raw: &str) -> Vec<QuizQuestion> {
    let fragments: Vec<&str> = raw.trim().split(ANSWER_MARKER).collect();
    let mut questions = Vec::with_capacity(fragments.len().saturating_sub(1));
    let mut skipped = 0usize;
    let mut fallbacks = 0usize;

    for (index, pair) in fragments.windows(2).enumerate() {
        let body = if index == 0 {
            pair[0]
        } else {
            without_answer_line(pair[0])
        };

        let Some(stem) = stem(body) else {
            skipped += 1;
            continue;
        };
        let options = options(body);

        let letter = answer_letter(pair[1]);
        let correct = match letter {
            Some(letter) if options.contains_key(letter) => Some(letter),
            _ => {
                fallbacks += 1;
                options.first_key()
            }
        };

        questions.push(QuizQuestion {
            question: stem.to_string(),
            options,
            correct,
        });
    }

    tracing::debug!(
        parsed = questions.len(),
        skipped,
        fallbacks,
        "parsed quiz text"
    );
    questions
}

/// Drop the answer line that belongs to the previous question.
fn without_answer_line(fragment: &str) -> &str {
    let rest = fragment.trim_start();
    match rest.find('\n') {
        Some(end) => &rest[end + 1..],
        None => "",
    }
}

fn stem(body: &str) -> Option<&str> {
    STEM_END.find(body).map(|m| body[..m.start()].trim())
}

fn options(body: &str) -> OptionSet {
    let mut options = OptionSet::new();
    for caps in OPTION_LINE.captures_iter(body) {
        let letter = caps[1].chars().next().unwrap_or('a');
        options.insert(letter, caps[2].trim());
    }
    options
}

fn answer_letter(next_fragment: &str) -> Option<char> {
    next_fragment
        .trim()
        .chars()
        .next()
        .and_then(|c| c.to_lowercase().next())
}
