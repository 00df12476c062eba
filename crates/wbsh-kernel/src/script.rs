//! Script execution.
//!
//! Scripts are plain text, one command per line. Blank lines and lines
//! starting with `;` are skipped. Nesting is bounded by an explicit depth
//! counter on the session; the bound trips at this function's entry, so a
//! too-deep EXECUTE fails at its call site and the enclosing script keeps
//! running its remaining lines.

use crate::error::ScriptError;
use crate::kernel::run_line;
use crate::session::Session;

/// Maximum EXECUTE nesting.
pub const MAX_SCRIPT_DEPTH: usize = 16;

/// Run the script at `raw`, returning its accumulated output.
///
/// A failing line is reported in the output and does not stop the script.
pub async fn run_script(session: &mut Session, raw: &str) -> Result<String, ScriptError> {
    if session.depth >= MAX_SCRIPT_DEPTH {
        return Err(ScriptError::TooDeep);
    }

    let loc = session
        .devices
        .resolve(raw, &session.device, &session.segments)
        .await
        .map_err(|_| ScriptError::NotFound(raw.to_string()))?;
    let bytes = session
        .devices
        .read(&loc)
        .await
        .map_err(|_| ScriptError::NotFound(raw.to_string()))?;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    session.depth += 1;
    let mut output = String::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }
        let result = run_line(session, trimmed).await;
        if !result.out.is_empty() {
            output.push_str(&result.out);
            if !result.out.ends_with('\n') {
                output.push('\n');
            }
        }
        if !result.err.is_empty() {
            output.push_str(&result.err);
            if !result.err.ends_with('\n') {
                output.push('\n');
            }
        }
        if session.exit_requested {
            break;
        }
    }
    session.depth -= 1;
    Ok(output)
}
