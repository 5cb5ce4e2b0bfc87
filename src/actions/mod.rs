pub mod catalog;

pub use catalog::{ActionCategory, ActionType};
