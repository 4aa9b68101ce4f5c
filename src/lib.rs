pub mod agent;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod global;
pub mod persona;
pub mod room;
pub mod video;
