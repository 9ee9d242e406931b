pub mod handler;

pub use handler::{handle_pomodoro_key, handle_todo_key};
