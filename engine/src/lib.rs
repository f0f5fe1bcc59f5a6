// Engine library root
// This file declares the modules for the trade-journal engine crate.

pub mod config;
pub mod data;
pub mod error;
pub mod feed;
pub mod playback;
pub mod services;
