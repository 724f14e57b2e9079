// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod model;

pub use error::{ListError, Result};
pub use model::{Item, Priority, TodoList};
