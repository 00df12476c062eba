use async_trait::async_trait;

use rand::Rng;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Deliberate crash screen.
pub struct Guru;

#[async_trait]
impl Tool for Guru {
    fn name(&self) -> &str {
        "GURU"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "GURU".to_string(),
            description: "Summon a Guru Meditation".to_string(),
            usage: "GURU".to_string(),
        }
    }

    async fn execute(&self, _args: ToolArgs, _ctx: &mut Session) -> ExecResult {
        let mut rng = rand::thread_rng();
        let task: u32 = rng.gen_range(1_000_000..=9_999_999);
        let code: u32 = rng.gen_range(0x8000_0001..=0x8FFF_FFFF);
        ExecResult::success(format!(
            "Software Failure.  Press left mouse button to continue.\n\
             Guru Meditation #{task:08X}.{code:08X}"
        ))
    }
}
