use async_trait::async_trait;

use chrono::Local;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Print the current date and time.
pub struct Date;

#[async_trait]
impl Tool for Date {
    fn name(&self) -> &str {
        "DATE"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "DATE".to_string(),
            description: "Show current date and time".to_string(),
            usage: "DATE".to_string(),
        }
    }

    async fn execute(&self, _args: ToolArgs, _ctx: &mut Session) -> ExecResult {
        ExecResult::success(Local::now().format("%A %d-%b-%y %H:%M:%S").to_string())
    }
}
