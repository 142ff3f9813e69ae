//! Core models and repositories.

pub mod assignment;
pub mod task;
pub mod user;

pub use assignment::AssignmentRepository;
pub use task::{Task, TaskRepository, TaskStatus};
pub use user::{User, UserRepository};
