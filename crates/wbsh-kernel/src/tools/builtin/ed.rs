use async_trait::async_trait;

use crate::editor::LineEditor;
use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Open the line editor on a file. The session goes modal until the editor
/// is closed with SAVE or QUIT.
pub struct Ed;

#[async_trait]
impl Tool for Ed {
    fn name(&self) -> &str {
        "ED"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "ED".to_string(),
            description: "Text editor".to_string(),
            usage: "ED <file>".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let Some(raw) = args.get_positional(0) else {
            return ExecResult::failure(1, "Usage: ED <file>");
        };
        let loc = match ctx.devices.resolve_target(raw, &ctx.device, &ctx.segments).await {
            Ok(loc) => loc,
            Err(err) => return ExecResult::failure(1, format!("ED: {err}")),
        };

        let contents = match ctx.devices.stat(&loc).await {
            Ok(meta) if meta.is_dir => {
                return ExecResult::failure(1, format!("ED: '{raw}' is a directory"));
            }
            Ok(_) => match ctx.devices.read(&loc).await {
                Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                Err(err) => return ExecResult::failure(1, format!("ED: {err}")),
            },
            Err(_) => None,
        };

        let editor = LineEditor::new(loc, contents.as_deref());
        let banner = editor.banner();
        ctx.editor = Some(editor);
        ExecResult::success(banner)
    }
}
