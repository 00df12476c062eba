use async_trait::async_trait;

use rand::seq::SliceRandom;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Easter egg.
pub struct Amiga;

const FACTS: &[&str] = &[
    "The Amiga was the first multimedia computer with custom chips: Agnus, Denise, and Paula!",
    "AmigaOS featured preemptive multitasking when other systems were still cooperative.",
    "The Amiga could display 4096 colors simultaneously using Half-Bright mode and HAM.",
    "Workbench 1.0 was released in 1985, making it one of the first GUI operating systems.",
    "The Amiga's sound chip Paula could play 4 PCM channels simultaneously at different frequencies.",
    "The Video Toaster made Amiga the king of video production in TV studios worldwide.",
    "Amiga's Copper chip could change colors mid-screen, creating stunning visual effects.",
];

const QUOTES: &[&str] = &[
    "The Amiga: Because creativity shouldn't have limits.",
    "Multitasking was not a luxury, it was an Amiga standard.",
    "Before there was multimedia, there was Amiga.",
    "The computer that made the impossible, possible.",
    "AmigaOS: The operating system that was ahead of its time.",
];

#[async_trait]
impl Tool for Amiga {
    fn name(&self) -> &str {
        "AMIGA"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "AMIGA".to_string(),
            description: "Amiga easter egg".to_string(),
            usage: "AMIGA".to_string(),
        }
    }

    async fn execute(&self, _args: ToolArgs, _ctx: &mut Session) -> ExecResult {
        let mut rng = rand::thread_rng();
        let fact = FACTS.choose(&mut rng).copied().unwrap_or(FACTS[0]);
        let quote = QUOTES.choose(&mut rng).copied().unwrap_or(QUOTES[0]);
        ExecResult::success(format!(
            "   \"Only Amiga Makes It Possible\"\n   \
             Commodore-Amiga, Inc. 1985-1995\n   \
             The Computer For The Creative Mind\n\
             \n\
             Did you know? {fact}\n\
             \n\
             Classic Amiga Volumes Available:\n   \
             SYS: (System Volume)\n   \
             RAM: (RAM Disk)\n   \
             DH0: (Hard Drive)\n   \
             C: (Commands Directory)\n\
             \n\
             \"{quote}\"\n\
             \n\
             Type HELP for available commands or start with: CD DH0:"
        ))
    }
}
