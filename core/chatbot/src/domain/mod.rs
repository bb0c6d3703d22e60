//! chatbot 固有のドメイン型（型と不変条件）

pub mod command;
pub mod output;
pub mod transcript;
pub mod user_text;

pub use command::ChatCommand;
pub use output::ChatOutput;
pub use transcript::Transcript;
pub use user_text::UserText;
