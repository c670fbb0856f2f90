pub mod beat;
pub mod comic;
pub mod script;
