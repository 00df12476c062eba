//! The command trait and its argument model.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;

/// Arguments after tokenization: positionals in order, plus `KEY=value`
/// pairs with the key uppercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolArgs {
    pub positional: Vec<String>,
    pub named: HashMap<String, String>,
}

impl ToolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    pub fn get_named(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    /// A named `KEY=n` argument parsed and clamped to `[min, max]`.
    pub fn get_clamped(&self, key: &str, default: u32, min: u32, max: u32) -> u32 {
        self.get_named(key)
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(default)
            .clamp(min, max)
    }
}

/// Self-description, shown by HELP.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub usage: String,
}

/// A shell command.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn schema(&self) -> ToolSchema;
    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult;
}
