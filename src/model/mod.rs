// File: ./src/model/mod.rs
pub mod item;
pub mod list;

pub use item::{Item, ParseItemError, Priority};
pub use list::TodoList;
