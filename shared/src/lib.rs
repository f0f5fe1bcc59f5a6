// Shared library root: domain models and small helpers used by both the
// engine and any client process.

pub mod models;
pub mod utils;
