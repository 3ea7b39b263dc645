//! Command handlers

pub mod category;
pub mod config;
pub mod init;
pub mod post;
pub mod render;
pub mod status;
