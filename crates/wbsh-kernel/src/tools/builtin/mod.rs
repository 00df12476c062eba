//! The built-in command set, one command per module.

mod amiga;
mod avail;
mod cd;
mod cls;
mod copy;
mod date;
mod delete;
mod dir;
mod echo;
mod ed;
mod execute;
mod exit;
mod guru;
mod help;
mod info;
mod makedir;
mod mount;
mod pattern;
mod ping;
mod say;
mod setenv;
mod status;
mod type_;
mod winuae;

use std::sync::Arc;

use super::registry::ToolRegistry;

/// Register every built-in command.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(Arc::new(amiga::Amiga));
    registry.register(Arc::new(avail::Avail));
    registry.register(Arc::new(cd::Cd));
    registry.register(Arc::new(cls::Cls::new("CLS")));
    registry.register(Arc::new(cls::Cls::new("CLEAR")));
    registry.register(Arc::new(copy::Copy));
    registry.register(Arc::new(date::Date));
    registry.register(Arc::new(delete::Delete));
    registry.register(Arc::new(dir::Dir));
    registry.register(Arc::new(echo::Echo));
    registry.register(Arc::new(ed::Ed));
    registry.register(Arc::new(execute::Execute));
    registry.register(Arc::new(exit::Exit::new("EXIT")));
    registry.register(Arc::new(exit::Exit::new("QUIT")));
    registry.register(Arc::new(guru::Guru));
    registry.register(Arc::new(help::Help));
    registry.register(Arc::new(info::Info));
    registry.register(Arc::new(makedir::Makedir));
    registry.register(Arc::new(mount::Mount));
    registry.register(Arc::new(pattern::Pattern));
    registry.register(Arc::new(ping::Ping));
    registry.register(Arc::new(say::Say));
    registry.register(Arc::new(setenv::Getenv));
    registry.register(Arc::new(setenv::Setenv));
    registry.register(Arc::new(status::Status));
    registry.register(Arc::new(type_::Type));
    registry.register(Arc::new(winuae::WinUae));
}
