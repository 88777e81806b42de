pub mod api;
pub mod cli;
pub mod errors;
pub mod feed;
pub mod logger;
pub mod terminal;
