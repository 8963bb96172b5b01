use serde::Serialize;
use std::fmt;

/// Kind of tracking record written to the daily file.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Action {
    Begin,
    End,
}

impl Action {
    /// Convert enum → file token
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Begin => "BEGIN",
            Action::End => "END",
        }
    }

    /// Convert file token → enum
    pub fn from_token(s: &str) -> Option<Self> {
        match s.trim() {
            "BEGIN" => Some(Action::Begin),
            "END" => Some(Action::End),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
