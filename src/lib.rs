pub mod api;
pub mod cache;
pub mod cli;
pub mod core;
pub mod google;
pub mod relay;
