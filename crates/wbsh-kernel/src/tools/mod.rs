pub mod builtin;
pub mod registry;
pub mod traits;

pub use registry::ToolRegistry;
pub use traits::{Tool, ToolArgs, ToolSchema};
