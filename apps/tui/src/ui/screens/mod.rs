pub mod browse;
pub mod edit_entity;
pub mod help;
pub mod picker;
pub mod prompt;
