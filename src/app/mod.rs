pub mod pomodoro;
pub mod todo;

pub use pomodoro::PomodoroApp;
pub use todo::TodoApp;
