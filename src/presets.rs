//! Feature presets: one key press fills the input with a canned command and
//! sends it.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub label: String,
    pub command: String,
}

impl Preset {
    pub fn new(label: &str, command: &str) -> Self {
        Self {
            label: label.to_string(),
            command: command.to_string(),
        }
    }

    pub fn builtin() -> Vec<Preset> {
        vec![
            Preset::new(
                "Create Website",
                "Create a professional portfolio website with dark theme",
            ),
            Preset::new(
                "Compose Email",
                "Compose an email to my team about the project update",
            ),
            Preset::new("Deploy Project", "Deploy my website to production"),
        ]
    }
}

/// F-key shown next to a preset in the preset bar. Only F1..F12 exist.
pub fn hotkey_label(index: usize) -> Option<String> {
    (index < 12).then(|| format!("F{}", index + 1))
}
