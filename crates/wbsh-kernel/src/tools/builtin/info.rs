use async_trait::async_trait;

use chrono::Local;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Themed system information.
pub struct Info;

#[async_trait]
impl Tool for Info {
    fn name(&self) -> &str {
        "INFO"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "INFO".to_string(),
            description: "Display system information".to_string(),
            usage: "INFO".to_string(),
        }
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let now = Local::now();
        let devices = ctx.devices.device_names().len();
        ExecResult::success(format!(
            "wbsh - Workbench Shell\n\
             Inspired by the legendary Amiga computer systems\n\
             \n\
             === AMIGA SIMULATION ===\n\
             System: AmigaOS 3.1\n\
             CPU: Motorola 68020 @ 25MHz\n\
             ChipRAM: 2MB\n\
             FastRAM: 8MB\n\
             Kickstart: 3.1 (40.68)\n\
             Workbench: 3.1\n\
             \n\
             === SHELL ===\n\
             Started: {}\n\
             Current Directory: {}\n\
             Devices Mounted: {}\n\
             Host Device: {}: -> {}\n\
             \n\
             Commands: type HELP for available commands",
            now.format("%d-%b-%y %H:%M:%S"),
            ctx.cwd(),
            devices,
            ctx.devices.host_name(),
            ctx.devices.host().root().display(),
        ))
    }
}
