pub mod directory;
pub mod handlers;
