pub mod board;
pub mod handlers;
