//! Cooperative run-to-completion scheduling

pub mod scheduler;
pub mod task;
pub mod timer;

pub use scheduler::Scheduler;
pub use task::{Task, TaskFunction, TaskStatistics};
pub use timer::OneShotTimer;
