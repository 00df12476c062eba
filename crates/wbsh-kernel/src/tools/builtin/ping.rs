use async_trait::async_trait;

use rand::Rng;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Themed ping. Reply lines are simulated; no packets leave the machine.
pub struct Ping;

const USAGE: &str = "Usage: PING <host> [COUNT=n]\n\
                     Examples:\n  \
                     PING google.com\n  \
                     PING 8.8.8.8 COUNT=5";

#[async_trait]
impl Tool for Ping {
    fn name(&self) -> &str {
        "PING"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "PING".to_string(),
            description: "Network ping utility".to_string(),
            usage: "PING <host> [COUNT=n]".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, _ctx: &mut Session) -> ExecResult {
        let Some(host) = args.get_positional(0) else {
            return ExecResult::success(USAGE);
        };
        let count = args.get_clamped("COUNT", 4, 1, 10);

        let mut rng = rand::thread_rng();
        let mut out = format!("PING {host} ({count} packets):\n\n");
        let mut total = 0u32;
        for _ in 0..count {
            let time: u32 = rng.gen_range(1..=40);
            total += time;
            out.push_str(&format!("Reply from {host}: bytes=32 time={time}ms TTL=64\n"));
        }
        out.push('\n');
        out.push_str(&format!("Ping statistics for {host}:\n"));
        out.push_str(&format!(
            "    Packets: Sent = {count}, Received = {count}, Lost = 0 (0% loss)\n"
        ));
        out.push_str("Approximate round trip times in milli-seconds:\n");
        out.push_str(&format!("    Average = {}ms\n", total / count));
        ExecResult::success(out)
    }
}
