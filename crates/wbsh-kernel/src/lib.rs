//! Retro shell kernel: devices, path resolution, and the command set.
//!
//! The kernel mounts a set of in-memory volumes (`SYS:`, `RAM:`, `C:`) and
//! one host-backed device, then interprets command lines against them. The
//! REPL crate wraps this in a line editor; everything observable happens
//! here.

pub mod complete;
pub mod editor;
pub mod error;
pub mod kernel;
pub mod lexer;
pub mod listing;
pub mod result;
pub mod script;
pub mod session;
pub mod tools;
pub mod vfs;

pub use error::{CommandError, PathError, ScriptError};
pub use kernel::{finish_editing, run_line, Kernel, KernelConfig};
pub use result::ExecResult;
pub use session::Session;
