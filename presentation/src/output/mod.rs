//! Output formatting for resolution results and errors

pub mod adapter;
pub mod console;
pub mod formatter;
