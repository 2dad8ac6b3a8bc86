/// One line of the human-readable battle log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub turn: u32,
    pub message: String,
}

impl LogEntry {
    pub fn new(turn: u32, message: impl Into<String>) -> Self {
        Self {
            turn,
            message: message.into(),
        }
    }
}

impl core::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[turn {}] {}", self.turn, self.message)
    }
}
