pub mod controller;
pub mod diff;
pub mod pagination;
pub mod presenter;
pub mod render;
pub mod state;
pub mod view;
