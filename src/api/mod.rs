pub mod client;
pub mod routes;
pub mod types;
