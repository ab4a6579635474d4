//! Result rendering and export

pub mod export;
pub mod formatter;
