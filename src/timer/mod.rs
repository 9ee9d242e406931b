pub mod scheduler;
pub mod session_timer;

pub use scheduler::{poll_interval, DeadlineScheduler};
pub use session_timer::SessionTimer;
