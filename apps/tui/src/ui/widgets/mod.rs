pub mod highlight;
pub mod popup;
pub mod tables;
