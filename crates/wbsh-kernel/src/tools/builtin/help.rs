use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Command table, or detail for one command.
pub struct Help;

#[async_trait]
impl Tool for Help {
    fn name(&self) -> &str {
        "HELP"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "HELP".to_string(),
            description: "Display this help".to_string(),
            usage: "HELP [command]".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        if let Some(name) = args.get_positional(0) {
            return match ctx.registry.get(name) {
                Some(tool) => {
                    let schema = tool.schema();
                    ExecResult::success(format!("{} - {}\nUsage: {}", schema.name, schema.description, schema.usage))
                }
                None => ExecResult::success(format!("No help available for '{name}'")),
            };
        }

        let mut out = String::from("Available commands:\n");
        let mut schemas: Vec<_> = ctx.registry.iter().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        for schema in schemas {
            out.push_str(&format!("  {:<8} - {}\n", schema.name, schema.description));
        }
        out.push_str(
            "\nAmiga Features:\n  \
             Type a device name (e.g., 'dh0:') to automatically CD to that directory\n  \
             Press Tab for path autocomplete (e.g., 'cd SYS:<Tab>' to complete directories)\n  \
             Startup sequence execution at shell startup (SYS:S/Startup-Sequence)\n",
        );
        ExecResult::success(out)
    }
}
