use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Themed speech synthesis. No audio is produced; the command validates its
/// arguments and reports what would be spoken.
pub struct Say;

const USAGE: &str = "Usage: SAY <text> [RATE=n] [VOICE=name]\n\
                     Examples:\n  \
                     SAY \"Hello from Amiga\"\n  \
                     SAY \"Welcome to the shell\" RATE=150\n  \
                     SAY \"Greetings\" VOICE=female";

#[async_trait]
impl Tool for Say {
    fn name(&self) -> &str {
        "SAY"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "SAY".to_string(),
            description: "Text-to-speech synthesis".to_string(),
            usage: "SAY <text> [RATE=n] [VOICE=name]".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, _ctx: &mut Session) -> ExecResult {
        if args.positional.is_empty() && args.named.is_empty() {
            return ExecResult::success(USAGE);
        }
        let text = args.positional.join(" ");
        if text.is_empty() {
            return ExecResult::failure(1, "SAY: No text specified");
        }

        let rate = args.get_clamped("RATE", 180, 50, 400);
        let mut out = format!("Speaking: \"{text}\"");
        out.push_str(&format!("\nRate: {rate} WPM"));
        if let Some(voice) = args.get_named("VOICE") {
            out.push_str(&format!("\nVoice: {voice}"));
        }
        ExecResult::success(out)
    }
}
