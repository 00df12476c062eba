//! Kernel construction and line dispatch.
//!
//! The kernel owns the mount table and the command registry. Sessions are
//! cheap handles over both; all interpreter state lives in the session.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use rand::Rng;

use crate::editor::EditorReply;
use crate::lexer;
use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::{builtin, ToolRegistry};
use crate::vfs::{DeviceMap, HostFs, VolumeTree};

/// Kernel construction options.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Host directory backing the hard-disk device.
    pub host_root: PathBuf,
    /// Device name for the host bridge.
    pub host_device: String,
    /// Run the startup sequence when the first session opens.
    pub run_startup: bool,
}

impl KernelConfig {
    pub fn new(host_root: impl Into<PathBuf>) -> Self {
        Self {
            host_root: host_root.into(),
            host_device: "DH0".to_string(),
            run_startup: true,
        }
    }
}

pub struct Kernel {
    devices: Arc<DeviceMap>,
    registry: Arc<ToolRegistry>,
    run_startup: bool,
}

impl Kernel {
    /// Build the mount table and registry. An unusable host root is the one
    /// fatal startup error.
    pub fn new(config: KernelConfig) -> anyhow::Result<Self> {
        let host = HostFs::new(&config.host_root).with_context(|| {
            format!("invalid host root: {}", config.host_root.display())
        })?;

        let sys = seed_sys()?;
        let ram = seed_ram()?;
        let commands = seed_commands()?;

        let mut devices = DeviceMap::new(
            vec![Arc::new(sys), Arc::new(ram), Arc::new(commands)],
            config.host_device,
            Arc::new(host),
        );
        devices.add_assign("S", "SYS", &["S"]);
        devices.add_assign("L", "SYS", &["L"]);
        devices.add_assign("DEVS", "SYS", &["DEVS"]);
        devices.add_assign("FONTS", "SYS", &["Fonts"]);
        devices.add_assign("T", "RAM", &["T"]);

        let mut registry = ToolRegistry::new();
        builtin::register_builtins(&mut registry);

        Ok(Self {
            devices: Arc::new(devices),
            registry: Arc::new(registry),
            run_startup: config.run_startup,
        })
    }

    pub fn devices(&self) -> &Arc<DeviceMap> {
        &self.devices
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Open a session, running the startup sequence if configured.
    pub async fn session(&self) -> (Session, String) {
        let mut session = Session::new(self.devices.clone(), self.registry.clone());
        let mut banner = String::new();
        if self.run_startup {
            banner = run_startup(&mut session).await;
        }
        (session, banner)
    }
}

fn seed_sys() -> anyhow::Result<VolumeTree> {
    let sys = VolumeTree::new("SYS");
    for dir in ["Prefs", "Tools", "L", "S", "C", "DEVS", "Fonts", "WBStartup"] {
        sys.mkdir(&[dir.to_string()])?;
    }
    for env in ["Env-Archive", "Env"] {
        sys.mkdir(&["Prefs".to_string(), env.to_string()])?;
        sys.write(
            &["Prefs".to_string(), env.to_string(), "PATH".to_string()],
            b"C: SYS:S SYS:C",
        )?;
        sys.write(
            &["Prefs".to_string(), env.to_string(), "SHELL".to_string()],
            b"SYS:C/Shell",
        )?;
    }
    sys.write(
        &["Tools".to_string(), "Shell-Startup".to_string()],
        b"; Shell-Startup\n",
    )?;
    sys.write(
        &["S".to_string(), "Startup-Sequence".to_string()],
        b"; Startup-Sequence\n; Executed when the shell boots.\n",
    )?;
    Ok(sys)
}

fn seed_ram() -> anyhow::Result<VolumeTree> {
    let ram = VolumeTree::new("RAM");
    ram.mkdir(&["T".to_string()])?;
    ram.write(&["T".to_string(), "Temp-File".to_string()], b"")?;
    Ok(ram)
}

fn seed_commands() -> anyhow::Result<VolumeTree> {
    let c = VolumeTree::new("C");
    for cmd in [
        "Info", "Avail", "Status", "Mount", "Ed", "Dir", "Cd", "Pattern", "Date", "Echo",
        "Help", "Amiga", "Ping", "WinUAE", "Say", "Guru",
    ] {
        c.install_command(cmd)?;
    }
    Ok(c)
}

/// Run the boot script, trying each conventional location in order. Failed
/// lines are carried in the returned output, never dropped.
async fn run_startup(session: &mut Session) -> String {
    let host_boot = format!("{}:S/Startup-Sequence", session.devices.host_name());
    for candidate in ["SYS:S/Startup-Sequence", host_boot.as_str(), "S:Startup-Sequence"] {
        match crate::script::run_script(session, candidate).await {
            Ok(output) => return output,
            Err(crate::error::ScriptError::NotFound(_)) => continue,
            Err(err) => {
                tracing::warn!(script = candidate, error = %err, "startup sequence failed");
                return String::new();
            }
        }
    }
    String::new()
}

/// Interpret one input line against the session.
///
/// While an editor is open the line is fed to it instead of the command
/// interpreter. State changes only after resolution succeeds.
pub async fn run_line(session: &mut Session, line: &str) -> ExecResult {
    if session.editing() {
        return run_editor_line(session, line).await;
    }

    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(';') {
        return ExecResult::success("");
    }

    // A bare `DEVICE:` line changes directory, Workbench style.
    if !trimmed.contains(char::is_whitespace)
        && trimmed.ends_with(':')
        && session.devices.is_device(&trimmed[..trimmed.len() - 1])
    {
        let target = lexer::Token {
            text: trimmed.to_string(),
            quoted: false,
        };
        return run_verb(session, "cd", std::slice::from_ref(&target)).await;
    }

    let tokens = match lexer::tokenize(trimmed) {
        Ok(tokens) => tokens,
        Err(err) => return ExecResult::failure(1, err.to_string()),
    };
    let Some((verb, rest)) = tokens.split_first() else {
        return ExecResult::success("");
    };
    run_verb(session, &verb.text, rest).await
}

async fn run_verb(session: &mut Session, verb: &str, rest: &[lexer::Token]) -> ExecResult {
    let Some(tool) = session.registry.clone().get(verb) else {
        return ExecResult::failure(10, guru_unknown(verb));
    };
    let args = lexer::parse_args(rest);
    tool.execute(args, session).await
}

fn guru_unknown(verb: &str) -> String {
    let mut rng = rand::thread_rng();
    let task: u32 = rng.gen_range(1_000_000..=9_999_999);
    let code: u32 = rng.gen_range(0x8000_0001..=0x8FFF_FFFF);
    let err = crate::error::CommandError::UnknownCommand(verb.to_string());
    format!(
        "Software Failure.  Press left mouse button to continue.\n\
         Guru Meditation #{task:08X}.{code:08X}\n\
         {err}. Type HELP for a list of commands."
    )
}

async fn run_editor_line(session: &mut Session, line: &str) -> ExecResult {
    let Some(editor) = session.editor.as_mut() else {
        return ExecResult::success("");
    };
    match editor.feed(line) {
        EditorReply::Output(text) => ExecResult::success(text),
        EditorReply::Save => finish_editing(session, true).await,
        EditorReply::Quit => finish_editing(session, false).await,
    }
}

/// Close the open editor, saving if asked. An editor that fails to save
/// stays open so the buffer is not lost.
pub async fn finish_editing(session: &mut Session, save: bool) -> ExecResult {
    let Some(editor) = session.editor.take() else {
        return ExecResult::success("");
    };
    if !save {
        return ExecResult::success("Editor exited without saving.");
    }
    let target = editor.target().clone();
    let contents = editor.contents();
    match session.devices.write(&target, contents.as_bytes()).await {
        Ok(()) => ExecResult::success("File saved."),
        Err(err) => {
            session.editor = Some(editor);
            ExecResult::failure(1, format!("ED: cannot save '{target}': {err}"))
        }
    }
}
