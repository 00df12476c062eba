//! REPL-level integration: one Repl over a temp host root.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use wbsh_kernel::KernelConfig;
use wbsh_repl::Repl;

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_dir() -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("wbsh-repl-test-{}-{}", std::process::id(), n));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn make_repl(host_root: &PathBuf) -> Repl {
    let mut config = KernelConfig::new(host_root);
    config.run_startup = false;
    Repl::new(config).unwrap()
}

#[test]
fn test_prompt_and_dispatch() {
    let dir = temp_dir();
    let mut repl = make_repl(&dir);
    assert_eq!(repl.prompt(), "SYS:> ");
    let result = repl.process_line("cd RAM:");
    assert!(result.ok(), "{}", result.err);
    assert_eq!(repl.prompt(), "RAM:> ");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_exit_command_requests_shutdown() {
    let dir = temp_dir();
    let mut repl = make_repl(&dir);
    let result = repl.process_line("exit");
    assert_eq!(result.out, "Goodbye!");
    assert!(repl.exit_requested());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_editor_interrupt_discard() {
    let dir = temp_dir();
    let mut repl = make_repl(&dir);
    repl.process_line("ed RAM:T/buffer.txt");
    assert!(repl.editing());
    repl.process_line("half-typed line");
    let closed = repl.close_editor(false);
    assert_eq!(closed.out, "Editor exited without saving.");
    assert!(!repl.editing());
    let typed = repl.process_line("type RAM:T/buffer.txt");
    assert!(!typed.ok());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_editor_interrupt_save() {
    let dir = temp_dir();
    let mut repl = make_repl(&dir);
    repl.process_line("ed RAM:T/kept.txt");
    repl.process_line("keep me");
    let closed = repl.close_editor(true);
    assert_eq!(closed.out, "File saved.");
    let typed = repl.process_line("type RAM:T/kept.txt");
    assert_eq!(typed.out, "keep me\n");
    std::fs::remove_dir_all(&dir).unwrap();
}
