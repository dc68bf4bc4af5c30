//! Backend bridge: commands queued by the UI and the worker that executes them.

pub mod commands;
pub mod runtime;
