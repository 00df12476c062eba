//! Command execution results.

/// The outcome of one command: exit code, stdout text, stderr text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub code: i64,
    pub out: String,
    pub err: String,
}

impl ExecResult {
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            err: String::new(),
        }
    }

    pub fn failure(code: i64, err: impl Into<String>) -> Self {
        Self {
            code,
            out: String::new(),
            err: err.into(),
        }
    }

    pub fn ok(&self) -> bool {
        self.code == 0
    }
}
