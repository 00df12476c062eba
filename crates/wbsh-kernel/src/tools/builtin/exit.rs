use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// End the session. Registered as both EXIT and QUIT.
pub struct Exit {
    name: &'static str,
}

impl Exit {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl Tool for Exit {
    fn name(&self) -> &str {
        self.name
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name.to_string(),
            description: "Exit the shell".to_string(),
            usage: self.name.to_string(),
        }
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut Session) -> ExecResult {
        ctx.exit_requested = true;
        ExecResult::success("Goodbye!")
    }
}
