use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Set a session environment variable, or list them all.
pub struct Setenv;

#[async_trait]
impl Tool for Setenv {
    fn name(&self) -> &str {
        "SETENV"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "SETENV".to_string(),
            description: "Set an environment variable".to_string(),
            usage: "SETENV [name value]".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        match (args.get_positional(0), args.get_positional(1)) {
            (Some(name), Some(_)) => {
                let value = args.positional[1..].join(" ");
                ctx.env.insert(name.to_string(), value);
                ExecResult::success("")
            }
            (Some(name), None) => ExecResult::failure(1, format!("SETENV: no value for '{name}'")),
            (None, _) => {
                let mut pairs: Vec<_> = ctx.env.iter().collect();
                pairs.sort();
                let mut out = String::new();
                for (name, value) in pairs {
                    out.push_str(&format!("{name}={value}\n"));
                }
                ExecResult::success(out)
            }
        }
    }
}

/// Print one session environment variable.
pub struct Getenv;

#[async_trait]
impl Tool for Getenv {
    fn name(&self) -> &str {
        "GETENV"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "GETENV".to_string(),
            description: "Print an environment variable".to_string(),
            usage: "GETENV <name>".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let Some(name) = args.get_positional(0) else {
            return ExecResult::failure(1, "Usage: GETENV <name>");
        };
        match ctx.env.get(name) {
            Some(value) => ExecResult::success(value.clone()),
            None => ExecResult::failure(1, format!("GETENV: '{name}' is not set")),
        }
    }
}
