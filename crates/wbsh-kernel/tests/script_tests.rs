//! Script engine behavior: startup sequence, EXECUTE, and recursion bounds.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use wbsh_kernel::vfs::VolumeTree;
use wbsh_kernel::{run_line, Kernel, KernelConfig, Session};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_dir() -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("wbsh-script-test-{}-{}", std::process::id(), n));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

async fn make_session(host_root: &PathBuf) -> Session {
    let mut config = KernelConfig::new(host_root);
    config.run_startup = false;
    let kernel = Kernel::new(config).unwrap();
    let (session, _) = kernel.session().await;
    session
}

fn volume(kernel: &Kernel, name: &str) -> Arc<VolumeTree> {
    kernel
        .devices()
        .volumes()
        .iter()
        .find(|v| v.name() == name)
        .unwrap()
        .clone()
}

fn segs(path: &str) -> Vec<String> {
    path.split('/').map(String::from).collect()
}

async fn write_script(session: &mut Session, path: &str, body: &str) {
    run_line(session, &format!("ed {path}")).await;
    for line in body.lines() {
        run_line(session, line).await;
    }
    let saved = run_line(session, "SAVE").await;
    assert!(saved.ok(), "{}", saved.err);
}

#[tokio::test]
async fn test_execute_runs_commands_and_collects_output() {
    let dir = temp_dir();
    let mut session = make_session(&dir).await;
    write_script(
        &mut session,
        "RAM:T/greet",
        "; a comment\n\necho first\necho second",
    )
    .await;
    let result = run_line(&mut session, "execute RAM:T/greet").await;
    assert!(result.ok(), "{}", result.err);
    assert_eq!(result.out, "first\nsecond\n");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_execute_missing_script() {
    let dir = temp_dir();
    let mut session = make_session(&dir).await;
    let result = run_line(&mut session, "execute RAM:T/absent").await;
    assert!(!result.ok());
    assert!(result.err.contains("not found"));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_scripts_can_change_directory() {
    let dir = temp_dir();
    let mut session = make_session(&dir).await;
    write_script(&mut session, "RAM:T/jump", "cd RAM:T").await;
    run_line(&mut session, "execute RAM:T/jump").await;
    assert_eq!(session.cwd(), "RAM:T");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_self_recursive_script_hits_depth_limit() {
    let dir = temp_dir();
    let mut session = make_session(&dir).await;
    write_script(&mut session, "RAM:T/loop", "execute RAM:T/loop").await;
    let result = run_line(&mut session, "execute RAM:T/loop").await;
    // The bound trips at the innermost EXECUTE; the error is reported once
    // in the accumulated output and the outer frames unwind cleanly.
    assert!(result.ok(), "{}", result.err);
    assert!(result.out.contains("recursion too deep"));
    assert_eq!(result.out.matches("recursion too deep").count(), 1);
    assert_eq!(session.depth, 0);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_script_continues_after_failed_execute() {
    let dir = temp_dir();
    let mut session = make_session(&dir).await;
    write_script(&mut session, "RAM:T/loop", "execute RAM:T/loop").await;
    write_script(
        &mut session,
        "RAM:T/outer",
        "echo before\nexecute RAM:T/loop\necho after",
    )
    .await;

    let result = run_line(&mut session, "execute RAM:T/outer").await;
    assert!(result.ok(), "{}", result.err);
    let before = result.out.find("before").unwrap();
    let failure = result.out.find("recursion too deep").unwrap();
    let after = result.out.find("after").unwrap();
    assert!(before < failure && failure < after);
    assert_eq!(session.depth, 0);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_startup_sequence_runs_when_enabled() {
    let dir = temp_dir();
    let kernel = Kernel::new(KernelConfig::new(&dir)).unwrap();
    let (session, banner) = kernel.session().await;
    // The seeded startup sequence is comment-only, so it produces no output
    // but must leave the session usable.
    assert!(banner.is_empty());
    assert_eq!(session.cwd(), "SYS:");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_startup_survives_failing_execute_line() {
    let dir = temp_dir();
    let kernel = Kernel::new(KernelConfig::new(&dir)).unwrap();
    volume(&kernel, "RAM")
        .write(&segs("T/loop"), b"execute RAM:T/loop\n")
        .unwrap();
    volume(&kernel, "SYS")
        .write(
            &segs("S/Startup-Sequence"),
            b"echo one\nexecute RAM:T/loop\necho two\n",
        )
        .unwrap();

    let (_, banner) = kernel.session().await;
    assert!(banner.contains("one"), "banner={banner:?}");
    assert!(banner.contains("recursion too deep"), "banner={banner:?}");
    assert!(banner.contains("two"), "banner={banner:?}");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_startup_discovery_uses_configured_host_device() {
    let dir = temp_dir();
    std::fs::create_dir(dir.join("S")).unwrap();
    std::fs::write(dir.join("S").join("Startup-Sequence"), "echo from host\n").unwrap();

    let mut config = KernelConfig::new(&dir);
    config.host_device = "WORK".to_string();
    let kernel = Kernel::new(config).unwrap();
    // Drop the seeded virtual boot script so discovery falls through to the
    // host-backed device.
    volume(&kernel, "SYS")
        .remove(&segs("S/Startup-Sequence"), false)
        .unwrap();

    let (_, banner) = kernel.session().await;
    assert!(banner.contains("from host"), "banner={banner:?}");
    std::fs::remove_dir_all(&dir).unwrap();
}
