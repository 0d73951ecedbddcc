pub mod actionh;
pub mod prompth;

pub use actionh::{Action, Dispatcher};
pub use prompth::{Answers, Field, Prompter, Question, QuestionSet, TerminalPrompter};
