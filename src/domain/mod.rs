pub mod enums;
pub mod session;
pub mod task;

pub use enums::{Mode, UiMode};
pub use session::SessionRecord;
pub use task::{Task, TaskError, TaskList};
