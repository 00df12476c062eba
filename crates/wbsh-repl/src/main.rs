//! wbsh CLI entry point.
//!
//! Usage:
//!   wbsh                       # Interactive shell
//!   wbsh -c <command>          # Execute one command and exit
//!   wbsh script.ws             # Run a host script file
//!   wbsh --root <dir>          # Back DH0: with <dir> instead of $HOME

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wbsh_kernel::KernelConfig;

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    let mut root: Option<PathBuf> = None;
    let mut command: Option<String> = None;
    let mut script: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(ExitCode::SUCCESS);
            }
            "--version" | "-V" => {
                println!("wbsh {}", env!("CARGO_PKG_VERSION"));
                return Ok(ExitCode::SUCCESS);
            }
            "--root" => {
                let value = args.get(i + 1).context("--root requires a directory")?;
                root = Some(PathBuf::from(value));
                i += 1;
            }
            arg if arg.starts_with("--root=") => {
                root = Some(PathBuf::from(&arg["--root=".len()..]));
            }
            "-c" => {
                let value = args.get(i + 1).context("-c requires a command argument")?;
                command = Some(value.clone());
                i += 1;
            }
            arg if !arg.starts_with('-') && script.is_none() => {
                script = Some(arg.to_string());
            }
            unknown => {
                eprintln!("Unknown option: {unknown}");
                eprintln!("Run 'wbsh --help' for usage.");
                return Ok(ExitCode::FAILURE);
            }
        }
        i += 1;
    }

    let host_root = match root {
        Some(path) => path,
        None => directories::BaseDirs::new()
            .map(|b| b.home_dir().to_path_buf())
            .context("Cannot determine home directory; pass --root <dir>")?,
    };
    let config = KernelConfig::new(host_root);

    if let Some(cmd) = command {
        let code = wbsh_repl::run_command(config, &cmd)?;
        return Ok(exit_code(code));
    }
    if let Some(path) = script {
        let code = wbsh_repl::run_script_file(config, &path)?;
        return Ok(exit_code(code));
    }

    wbsh_repl::run(config)?;
    Ok(ExitCode::SUCCESS)
}

fn exit_code(code: i64) -> ExitCode {
    if code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(code.clamp(1, 255) as u8)
    }
}

fn print_help() {
    println!(
        "wbsh {} - Workbench Shell

Usage:
  wbsh                    Interactive shell
  wbsh -c <command>       Execute one command and exit
  wbsh <script>           Run a host script file
  wbsh --root <dir>       Back DH0: with <dir> (default: home directory)

Options:
  -h, --help              Show this help
  -V, --version           Show version",
        env!("CARGO_PKG_VERSION")
    );
}
