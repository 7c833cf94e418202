//! Helper functions shared by the section builders

mod date;
mod html;

pub use date::*;
pub use html::*;
