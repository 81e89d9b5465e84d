//! Command implementations, one module per command group

pub mod account;
pub mod admin;
pub mod content;
pub mod listen;

pub use listen::ListenOptions;
