pub mod files;
pub mod sessions;
pub mod tasks;

pub use files::{init_local_dir, read_json, DataDir, StoreError};
pub use sessions::{JsonSessionStore, SessionStore};
pub use tasks::{load_tasks_or_fresh, save_tasks};
