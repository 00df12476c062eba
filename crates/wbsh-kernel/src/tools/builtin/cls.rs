use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Clear the screen. Registered as both CLS and CLEAR.
pub struct Cls {
    name: &'static str,
}

impl Cls {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl Tool for Cls {
    fn name(&self) -> &str {
        self.name
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name.to_string(),
            description: "Clear screen".to_string(),
            usage: self.name.to_string(),
        }
    }

    async fn execute(&self, _args: ToolArgs, _ctx: &mut Session) -> ExecResult {
        ExecResult::success("\x1b[2J\x1b[H")
    }
}
