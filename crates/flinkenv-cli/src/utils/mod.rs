//! Terminal utilities shared by handlers.

pub mod input;
