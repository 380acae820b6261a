mod page;
mod question;
mod result;

pub use page::{Page, Trigger};
pub use question::{OptionSet, QuizQuestion};
pub use result::ResultEntry;
