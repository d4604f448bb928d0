//! Driven adapters — concrete implementations of the port traits plus the
//! time source.  Everything outside this ring is hardware-agnostic.

pub mod hardware;
pub mod log_sink;
pub mod time;
