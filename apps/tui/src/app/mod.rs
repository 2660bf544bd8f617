// App module for sports_mapper
// Holds console state and key handling

pub mod form;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen};
