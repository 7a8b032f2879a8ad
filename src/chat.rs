use chrono::{DateTime, Local};

pub const GREETING: &str = "Hello! I'm your personal AI assistant. How can I help you today?";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
    System,
}

#[derive(Clone, Debug)]
pub struct ChatEntry {
    pub sender: Sender,
    /// Shown exactly as received, markup included.
    pub text: String,
    pub at: DateTime<Local>,
}

#[derive(Clone, Debug, Default)]
pub struct ChatLog {
    entries: Vec<ChatEntry>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting() -> Self {
        let mut log = Self::new();
        log.push(Sender::Assistant, GREETING);
        log
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) {
        self.entries.push(ChatEntry {
            sender,
            text: text.into(),
            at: Local::now(),
        });
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    pub fn from_sender(&self, sender: Sender) -> impl Iterator<Item = &ChatEntry> {
        self.entries.iter().filter(move |e| e.sender == sender)
    }

    pub fn assistant_entries(&self) -> impl Iterator<Item = &ChatEntry> {
        self.from_sender(Sender::Assistant)
    }

    /// Number of rendered lines: one header, the content lines, one spacer.
    pub fn line_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| 2 + e.text.lines().count().max(1))
            .sum()
    }
}
