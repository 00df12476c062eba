use async_trait::async_trait;

use chrono::Local;
use rand::Rng;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Themed system status.
pub struct Status;

#[async_trait]
impl Tool for Status {
    fn name(&self) -> &str {
        "STATUS"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "STATUS".to_string(),
            description: "Show system status".to_string(),
            usage: "STATUS".to_string(),
        }
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let now = Local::now();
        let process: u32 = rand::thread_rng().gen_range(1..=99);
        let mut out = format!(
            "=== AMIGA SYSTEM STATUS ===\n\
             Date: {}\n\
             Time: {}\n\
             CLI: Shell Process #{}\n\
             Current Directory: {}\n\
             Task Priority: 0\n\
             Stack: 8000 bytes used of 32000\n\
             Free Memory: 6.2MB Chip, 7.8MB Fast\n\
             \n\
             === MOUNTED DEVICES ===\n",
            now.format("%d-%b-%y"),
            now.format("%H:%M:%S"),
            process,
            ctx.cwd(),
        );
        for volume in ctx.devices.volumes() {
            let count = volume.list(&[]).map(|e| e.len()).unwrap_or(0);
            out.push_str(&format!(
                "{:<8} Virtual Device ({} entries)\n",
                format!("{}:", volume.name()),
                count
            ));
        }
        out.push_str(&format!(
            "{:<8} Host Directory ({})\n",
            format!("{}:", ctx.devices.host_name()),
            ctx.devices.host().root().display()
        ));
        ExecResult::success(out)
    }
}
