//! wbsh REPL — interactive Workbench-style shell.
//!
//! Wraps the wbsh kernel in a rustyline loop:
//! - Prompt follows the session's current directory (or the line editor's
//!   line counter while ED is open)
//! - Tab completion for commands, device names, and paths
//! - Command history via rustyline, persisted under the user data dir

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use tokio::runtime::Runtime;

use wbsh_kernel::vfs::DeviceMap;
use wbsh_kernel::{finish_editing, run_line, ExecResult, Kernel, KernelConfig, Session};

/// Shared view of the session's current directory, kept fresh for the
/// completion helper.
type CwdCell = Arc<Mutex<(String, Vec<String>)>>;

/// rustyline helper: completes command verbs at the start of the line and
/// device-relative paths everywhere else.
struct WbshHelper {
    devices: Arc<DeviceMap>,
    commands: Vec<String>,
    cwd: CwdCell,
    handle: tokio::runtime::Handle,
}

impl Completer for WbshHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace())
            .map(|i| i + 1)
            .unwrap_or(0);
        let word = &line[start..pos];

        let mut candidates = Vec::new();
        if start == 0 {
            for name in &self.commands {
                if name.len() >= word.len() && name[..word.len()].eq_ignore_ascii_case(word) {
                    candidates.push(name.clone());
                }
            }
        }
        let (device, segments) = match self.cwd.lock() {
            Ok(cwd) => cwd.clone(),
            Err(_) => return Ok((start, Vec::new())),
        };
        candidates.extend(
            self.handle
                .block_on(wbsh_kernel::complete::complete(&self.devices, &device, &segments, word)),
        );
        candidates.sort();
        candidates.dedup();

        let pairs = candidates
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for WbshHelper {
    type Hint = String;
}

impl Highlighter for WbshHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for WbshHelper {}
impl Helper for WbshHelper {}

/// REPL state: the kernel, its runtime, and one interactive session.
pub struct Repl {
    runtime: Runtime,
    session: Session,
    cwd: CwdCell,
    banner: String,
}

impl Repl {
    pub fn new(config: KernelConfig) -> Result<Self> {
        let kernel = Kernel::new(config).context("Failed to create kernel")?;
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let (session, banner) = runtime.block_on(kernel.session());
        let cwd = Arc::new(Mutex::new((session.device.clone(), session.segments.clone())));
        Ok(Self {
            runtime,
            session,
            cwd,
            banner,
        })
    }

    fn helper(&self) -> WbshHelper {
        WbshHelper {
            devices: self.session.devices.clone(),
            commands: self.session.registry.names(),
            cwd: self.cwd.clone(),
            handle: self.runtime.handle().clone(),
        }
    }

    fn sync_cwd(&self) {
        if let Ok(mut cwd) = self.cwd.lock() {
            *cwd = (self.session.device.clone(), self.session.segments.clone());
        }
    }

    /// Run one input line and return its result.
    pub fn process_line(&mut self, line: &str) -> ExecResult {
        let result = self.runtime.block_on(run_line(&mut self.session, line));
        self.sync_cwd();
        result
    }

    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    pub fn editing(&self) -> bool {
        self.session.editing()
    }

    pub fn exit_requested(&self) -> bool {
        self.session.exit_requested
    }

    /// Close an open editor, saving or discarding.
    pub fn close_editor(&mut self, save: bool) -> ExecResult {
        self.runtime
            .block_on(finish_editing(&mut self.session, save))
    }
}

fn print_result(result: &ExecResult) {
    if !result.out.is_empty() {
        println!("{}", result.out.trim_end_matches('\n'));
    }
    if !result.err.is_empty() {
        eprintln!("{}", result.err.trim_end_matches('\n'));
    }
}

/// Save REPL history to disk.
fn save_history(rl: &mut Editor<WbshHelper, DefaultHistory>, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create history directory: {}", e);
            }
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

/// Run the interactive REPL.
pub fn run(config: KernelConfig) -> Result<()> {
    println!("wbsh v{} - Workbench Shell", env!("CARGO_PKG_VERSION"));
    println!("Type HELP for commands, EXIT to quit.");

    let mut repl = Repl::new(config)?;
    if !repl.banner.is_empty() {
        println!("{}", repl.banner.trim_end_matches('\n'));
    }

    let mut rl: Editor<WbshHelper, DefaultHistory> =
        Editor::new().context("Failed to create editor")?;
    rl.set_helper(Some(repl.helper()));

    let history_path =
        directories::BaseDirs::new().map(|b| b.data_dir().join("wbsh").join("history.txt"));
    if let Some(ref path) = history_path {
        if let Err(e) = rl.load_history(path) {
            let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
            if !is_not_found {
                tracing::warn!("Failed to load history: {}", e);
            }
        }
    }

    println!();

    loop {
        match rl.readline(&repl.prompt()) {
            Ok(line) => {
                if !repl.editing() {
                    if let Err(e) = rl.add_history_entry(line.as_str()) {
                        tracing::warn!("Failed to add history entry: {}", e);
                    }
                }
                let result = repl.process_line(&line);
                print_result(&result);
                if repl.exit_requested() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if repl.editing() {
                    // An open editor gets a chance to keep its buffer.
                    let save = matches!(
                        rl.readline("Save changes before exiting? (y/N) "),
                        Ok(answer) if answer.trim().eq_ignore_ascii_case("y")
                    );
                    print_result(&repl.close_editor(save));
                } else {
                    println!("^C");
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                if repl.editing() {
                    print_result(&repl.close_editor(false));
                    continue;
                }
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    save_history(&mut rl, &history_path);
    Ok(())
}

/// Execute one command line and exit.
pub fn run_command(config: KernelConfig, cmd: &str) -> Result<i64> {
    let mut repl = Repl::new(config)?;
    let result = repl.process_line(cmd);
    print_result(&result);
    Ok(result.code)
}

/// Run a script file from the host filesystem and exit.
pub fn run_script_file(config: KernelConfig, path: &str) -> Result<i64> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {path}"))?;
    let mut repl = Repl::new(config)?;
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }
        let result = repl.process_line(trimmed);
        print_result(&result);
        if !result.ok() {
            return Ok(result.code);
        }
        if repl.exit_requested() {
            break;
        }
    }
    Ok(0)
}
