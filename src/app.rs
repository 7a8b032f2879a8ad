//! Client state and the operations the key bindings trigger.
//!
//! Nothing here touches the terminal or the network: `submit_input` hands back
//! the command to post and `complete_send` takes the outcome, so the event
//! loop owns all I/O and the state transitions can be driven directly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::{
    chat::{ChatLog, Sender},
    config::{ConfigRecord, ConfigStore},
    endpoint::{Action, Reply},
    error::{AssistError, Result},
    presets::Preset,
    theme::Theme,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Input,
    KeyField,
    Presets,
}

impl Focus {
    fn next(self) -> Focus {
        match self {
            Focus::Input => Focus::KeyField,
            Focus::KeyField => Focus::Presets,
            Focus::Presets => Focus::Input,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ApiStatus {
    Connected,
    NotConfigured,
}

impl ApiStatus {
    pub fn text(self) -> &'static str {
        match self {
            ApiStatus::Connected => "Connected to DeepSeek",
            ApiStatus::NotConfigured => "API not configured",
        }
    }
}

pub struct App {
    config: ConfigRecord,
    store: ConfigStore,
    theme: Theme,
    status: ApiStatus,

    pub chat: ChatLog,
    /// Lines scrolled up from the newest entry; 0 follows the tail.
    pub chat_scroll: u16,
    pub input: String,
    pub key_field: String,
    pub focus: Focus,
    pub preset_idx: usize,
    presets: Vec<Preset>,

    /// Cleared while a request is outstanding. Presets ignore it.
    controls_enabled: bool,
    in_flight: usize,
    pub endpoint_url: String,
    pub quit: bool,
}

impl App {
    pub fn new(
        config: ConfigRecord,
        store: ConfigStore,
        presets: Vec<Preset>,
        endpoint_url: String,
    ) -> Self {
        let theme = Theme::for_mode(config.is_dark_mode);
        let key_field = config.deepseek_key.clone();
        let mut app = Self {
            config,
            store,
            theme,
            status: ApiStatus::NotConfigured,
            chat: ChatLog::with_greeting(),
            chat_scroll: 0,
            input: String::new(),
            key_field,
            focus: Focus::Input,
            preset_idx: 0,
            presets,
            controls_enabled: true,
            in_flight: 0,
            endpoint_url,
            quit: false,
        };
        app.refresh_status();
        app
    }

    /// Loads the stored record, falling back to defaults if it is unreadable.
    pub fn load(store: ConfigStore, presets: Vec<Preset>, endpoint_url: String) -> Self {
        let config = match store.load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, path = %store.path().display(), "stored config unreadable, using defaults");
                ConfigRecord::default()
            }
        };
        Self::new(config, store, presets, endpoint_url)
    }

    pub fn config(&self) -> &ConfigRecord {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn status(&self) -> ApiStatus {
        self.status
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn awaiting_reply(&self) -> bool {
        self.in_flight > 0
    }

    pub fn input_focused(&self) -> bool {
        self.focus == Focus::Input
    }

    fn refresh_status(&mut self) {
        self.status = if self.config.is_configured() {
            ApiStatus::Connected
        } else {
            ApiStatus::NotConfigured
        };
    }

    fn add_message(&mut self, sender: Sender, text: impl Into<String>) {
        self.chat.push(sender, text);
        self.chat_scroll = 0;
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.config)
    }

    // ---------- Operations ----------

    /// First half of send-message. Returns the command to post, or `None` when
    /// there is nothing to send or the send already failed locally.
    pub fn submit_input(&mut self) -> Option<String> {
        let message = self.input.trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.add_message(Sender::User, message.clone());
        self.input.clear();
        self.controls_enabled = false;
        self.in_flight += 1;

        if !self.config.is_configured() {
            self.complete_send(Err(AssistError::MissingCredential));
            return None;
        }
        debug!(in_flight = self.in_flight, "dispatching command");
        Some(message)
    }

    /// Second half of send-message. Always re-enables the controls and puts
    /// focus back on the input.
    pub fn complete_send(&mut self, outcome: Result<Reply>) {
        match outcome {
            Ok(reply) => {
                self.add_message(Sender::Assistant, reply.text);
                if let Some(action) = reply.action {
                    info!(action = action.as_str(), "endpoint reported an action");
                    let note = match action {
                        Action::Deploy => "Deployment initiated!",
                        Action::Email => "Email draft ready.",
                    };
                    self.add_message(Sender::System, note);
                }
            }
            Err(e) => {
                warn!(error = %e, "send failed");
                self.add_message(Sender::Assistant, format!("Error: {}", e));
            }
        }
        self.in_flight = self.in_flight.saturating_sub(1);
        self.controls_enabled = true;
        self.focus = Focus::Input;
    }

    pub fn toggle_theme(&mut self) {
        self.config.is_dark_mode = !self.config.is_dark_mode;
        self.theme = Theme::for_mode(self.config.is_dark_mode);
        if let Err(e) = self.persist() {
            warn!(error = %e, "could not persist theme");
            self.add_message(Sender::System, format!("Error: {}", e));
        }
    }

    pub fn save_config(&mut self) {
        self.config.deepseek_key = self.key_field.clone();
        match self.persist() {
            Ok(()) => self.add_message(Sender::Assistant, "Configuration saved successfully!"),
            Err(e) => {
                warn!(error = %e, "could not persist config");
                self.add_message(Sender::System, format!("Error: {}", e));
            }
        }
        self.refresh_status();
    }

    /// Fills the input with the preset's command and sends it, even while a
    /// previous request is still outstanding.
    pub fn apply_preset(&mut self, index: usize) -> Option<String> {
        let command = self.presets.get(index)?.command.clone();
        self.input = command;
        self.submit_input()
    }

    // ---------- Key handling ----------

    /// Applies one key press. Returns a command when the key started a send.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<String> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        // Chords never insert text; Shift still does.
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.quit = true;
                return None;
            }
            KeyCode::Char('t') if ctrl => {
                self.toggle_theme();
                return None;
            }
            KeyCode::Char('s') if ctrl => {
                self.save_config();
                return None;
            }
            KeyCode::Esc => {
                self.quit = true;
                return None;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::F(n) if n >= 1 => return self.apply_preset(usize::from(n - 1)),
            KeyCode::PageUp => {
                self.chat_scroll = self.chat_scroll.saturating_add(5);
                return None;
            }
            KeyCode::PageDown => {
                self.chat_scroll = self.chat_scroll.saturating_sub(5);
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => {
                if !self.controls_enabled {
                    return None;
                }
                match key.code {
                    KeyCode::Enter => return self.submit_input(),
                    KeyCode::Backspace => {
                        self.input.pop();
                    }
                    KeyCode::Char(c) if plain => self.input.push(c),
                    KeyCode::Up => self.chat_scroll = self.chat_scroll.saturating_add(1),
                    KeyCode::Down => self.chat_scroll = self.chat_scroll.saturating_sub(1),
                    _ => {}
                }
            }
            Focus::KeyField => match key.code {
                KeyCode::Enter => self.save_config(),
                KeyCode::Backspace => {
                    self.key_field.pop();
                }
                KeyCode::Char(c) if plain => self.key_field.push(c),
                _ => {}
            },
            Focus::Presets => match key.code {
                KeyCode::Left => self.preset_idx = self.preset_idx.saturating_sub(1),
                KeyCode::Right => {
                    if !self.presets.is_empty() {
                        self.preset_idx = (self.preset_idx + 1).min(self.presets.len() - 1);
                    }
                }
                KeyCode::Enter => return self.apply_preset(self.preset_idx),
                KeyCode::Char(c) if plain => {
                    if let Some(d) = c.to_digit(10).filter(|d| *d >= 1) {
                        return self.apply_preset(d as usize - 1);
                    }
                }
                _ => {}
            },
        }
        None
    }
}
