pub mod a2a;

pub use a2a::{A2aController, TaskStore};
