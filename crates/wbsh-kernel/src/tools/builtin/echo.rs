use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Echo arguments back, expanding `$NAME` from the session environment.
pub struct Echo;

fn expand(text: &str, ctx: &Session) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            out.push('$');
        } else if let Some(value) = ctx.env.get(&name) {
            out.push_str(value);
        }
    }
    out
}

#[async_trait]
impl Tool for Echo {
    fn name(&self) -> &str {
        "ECHO"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "ECHO".to_string(),
            description: "Echo text to terminal".to_string(),
            usage: "ECHO <text>".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let text = args.positional.join(" ");
        ExecResult::success(expand(&text, ctx))
    }
}
