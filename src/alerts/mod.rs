//! Alert rendering for the delivery channel.

pub mod formatter;

pub use formatter::*;
