pub mod draft;
pub mod handlers;
