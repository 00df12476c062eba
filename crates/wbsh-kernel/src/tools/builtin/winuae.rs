use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Themed emulator launcher. No external process is started.
pub struct WinUae;

#[async_trait]
impl Tool for WinUae {
    fn name(&self) -> &str {
        "WINUAE"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "WINUAE".to_string(),
            description: "Launch the WinUAE Amiga emulator".to_string(),
            usage: "WINUAE [config]".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, _ctx: &mut Session) -> ExecResult {
        let config = args
            .get_positional(0)
            .map(String::from)
            .unwrap_or_else(|| "Default".to_string());
        ExecResult::success(format!(
            "WinUAE Integration\n\
             ========================================\n\
             Configuration: {config}\n\
             Emulator launching is not available in this shell.\n\
             Set the WINUAE_PATH environment variable on a host with WinUAE installed."
        ))
    }
}
