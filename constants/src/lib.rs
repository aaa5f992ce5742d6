//! Fixed policy values shared by the model viewer crates.

pub mod asset;
pub mod controls;
pub mod mount;
pub mod render_settings;
pub mod viewpoints;
