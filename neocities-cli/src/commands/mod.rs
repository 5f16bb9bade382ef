mod completion;
mod delete;
mod info;
mod list;
mod push;
mod upload;

use std::time::Duration;

pub use completion::CompletionsCommand;
pub use delete::DeleteCommand;
pub use info::InfoCommand;
pub use list::ListCommand;
pub use push::PushCommand;
pub use upload::UploadCommand;

pub const PROGRESS_BAR_TICKRATE: Duration = Duration::from_millis(200);
