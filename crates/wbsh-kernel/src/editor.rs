//! Modal line editor.
//!
//! While an editor is open, every input line is routed here instead of the
//! command interpreter. The session owns the editor and performs the actual
//! save, so the editor itself never touches a device.

use crate::vfs::ResolvedLocation;

/// What the session should do with a line fed to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorReply {
    /// Print this text and keep editing.
    Output(String),
    /// Write the buffer to the target and close the editor.
    Save,
    /// Close the editor without writing.
    Quit,
}

/// An open editing session over one file.
#[derive(Debug, Clone)]
pub struct LineEditor {
    target: ResolvedLocation,
    lines: Vec<String>,
}

impl LineEditor {
    pub fn new(target: ResolvedLocation, contents: Option<&str>) -> Self {
        let lines = match contents {
            Some(text) if !text.is_empty() => text.lines().map(String::from).collect(),
            _ => Vec::new(),
        };
        Self { target, lines }
    }

    pub fn target(&self) -> &ResolvedLocation {
        &self.target
    }

    /// The buffer as file contents. Non-empty buffers get a trailing newline.
    pub fn contents(&self) -> String {
        if self.lines.is_empty() {
            String::new()
        } else {
            let mut text = self.lines.join("\n");
            text.push('\n');
            text
        }
    }

    /// Banner printed when the editor opens.
    pub fn banner(&self) -> String {
        let mut out = format!("Editing '{}'\n", self.target);
        out.push_str("Commands: LIST (show lines), SAVE (save file), QUIT (exit without saving)\n");
        if self.lines.is_empty() {
            out.push_str("Empty file - start typing to add content.\n");
        } else {
            out.push_str(&self.numbered());
        }
        out
    }

    /// Prompt for the next input line.
    pub fn prompt(&self) -> String {
        format!("{:3}> ", self.lines.len() + 1)
    }

    fn numbered(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            out.push_str(&format!("{:3}: {}\n", i + 1, line));
        }
        out
    }

    /// Process one input line. Directives are matched case-insensitively
    /// against the whole trimmed line; anything else is appended.
    pub fn feed(&mut self, line: &str) -> EditorReply {
        match line.trim().to_ascii_uppercase().as_str() {
            "LIST" => {
                if self.lines.is_empty() {
                    EditorReply::Output("(empty file)".to_string())
                } else {
                    EditorReply::Output(self.numbered().trim_end().to_string())
                }
            }
            "SAVE" => EditorReply::Save,
            "QUIT" => EditorReply::Quit,
            _ => {
                self.lines.push(line.to_string());
                EditorReply::Output(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> ResolvedLocation {
        ResolvedLocation::Virtual {
            device: "RAM".to_string(),
            segments: vec!["T".to_string(), "f".to_string()],
        }
    }

    #[test]
    fn test_typed_lines_accumulate() {
        let mut ed = LineEditor::new(target(), None);
        ed.feed("hello");
        ed.feed("world");
        assert_eq!(ed.contents(), "hello\nworld\n");
    }

    #[test]
    fn test_list_shows_numbered_lines() {
        let mut ed = LineEditor::new(target(), Some("alpha\nbeta"));
        match ed.feed("list") {
            EditorReply::Output(text) => {
                assert_eq!(text, "  1: alpha\n  2: beta");
            }
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn test_save_and_quit_directives() {
        let mut ed = LineEditor::new(target(), None);
        assert_eq!(ed.feed("SAVE"), EditorReply::Save);
        assert_eq!(ed.feed("quit"), EditorReply::Quit);
    }

    #[test]
    fn test_prompt_tracks_line_count() {
        let mut ed = LineEditor::new(target(), None);
        assert_eq!(ed.prompt(), "  1> ");
        ed.feed("one");
        assert_eq!(ed.prompt(), "  2> ");
    }

    #[test]
    fn test_existing_contents_are_loaded() {
        let ed = LineEditor::new(target(), Some("keep\nthese\n"));
        assert_eq!(ed.contents(), "keep\nthese\n");
        assert!(ed.banner().contains("  2: these"));
    }
}
