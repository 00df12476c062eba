//! Per-shell interpreter state.

use std::collections::HashMap;
use std::sync::Arc;

use crate::editor::LineEditor;
use crate::tools::ToolRegistry;
use crate::vfs::DeviceMap;

/// Everything one shell instance mutates as it runs: current directory,
/// session environment, the open editor if any, and script bookkeeping.
pub struct Session {
    pub devices: Arc<DeviceMap>,
    pub registry: Arc<ToolRegistry>,
    pub device: String,
    pub segments: Vec<String>,
    pub env: HashMap<String, String>,
    pub depth: usize,
    pub editor: Option<LineEditor>,
    pub exit_requested: bool,
}

impl Session {
    pub fn new(devices: Arc<DeviceMap>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            devices,
            registry,
            device: "SYS".to_string(),
            segments: Vec::new(),
            env: HashMap::new(),
            depth: 0,
            editor: None,
            exit_requested: false,
        }
    }

    /// Current directory as shown to the user, e.g. `SYS:` or `SYS:S/Foo`.
    pub fn cwd(&self) -> String {
        format!("{}:{}", self.device, self.segments.join("/"))
    }

    /// The interactive prompt. While an editor is open its line prompt
    /// takes over.
    pub fn prompt(&self) -> String {
        match &self.editor {
            Some(editor) => editor.prompt(),
            None => format!("{}> ", self.cwd()),
        }
    }

    pub fn editing(&self) -> bool {
        self.editor.is_some()
    }
}
