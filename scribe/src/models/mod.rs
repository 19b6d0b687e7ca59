pub mod notes;
pub mod search;
