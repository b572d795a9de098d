//! Operation flow: resolve pip, run it, parse its output, record the effect.

pub mod context;
pub mod error;
pub mod exec;
pub mod parse;
pub mod undo;
pub mod venv;
