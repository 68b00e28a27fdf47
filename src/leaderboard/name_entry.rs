//! Name entry for the game-over dialog

use crate::consts::{DEFAULT_NAME, MAX_NAME_LEN};

/// Placeholder shown while the field is empty
pub const PLACEHOLDER: &str = "Enter your name...";

/// A key press routed to the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKey {
    Char(char),
    Backspace,
    Enter,
}

/// What the dialog should do after a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntryAction {
    /// Field text changed, redraw it
    Edited,
    /// Submit under this name
    Submit(String),
    /// Nothing changed
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct NameEntry {
    name: String,
    submitted: bool,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: NameKey) -> NameEntryAction {
        if self.submitted {
            return NameEntryAction::Ignored;
        }
        match key {
            NameKey::Enter => self.submit(),
            NameKey::Backspace => {
                if self.name.pop().is_some() {
                    NameEntryAction::Edited
                } else {
                    NameEntryAction::Ignored
                }
            }
            NameKey::Char(c) if !c.is_control() && self.name.chars().count() < MAX_NAME_LEN => {
                self.name.push(c);
                NameEntryAction::Edited
            }
            NameKey::Char(_) => NameEntryAction::Ignored,
        }
    }

    /// Submit button; only the first submit counts
    pub fn submit(&mut self) -> NameEntryAction {
        if self.submitted {
            return NameEntryAction::Ignored;
        }
        self.submitted = true;
        let name = if self.name.is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            self.name.clone()
        };
        NameEntryAction::Submit(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Text for the input field
    pub fn display(&self) -> &str {
        if self.name.is_empty() {
            PLACEHOLDER
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(entry: &mut NameEntry, s: &str) {
        for c in s.chars() {
            entry.handle_key(NameKey::Char(c));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut e = NameEntry::new();
        assert_eq!(e.display(), PLACEHOLDER);
        type_str(&mut e, "Rexy");
        assert_eq!(e.handle_key(NameKey::Backspace), NameEntryAction::Edited);
        assert_eq!(e.display(), "Rex");
    }

    #[test]
    fn test_length_cap() {
        let mut e = NameEntry::new();
        type_str(&mut e, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(e.name(), "abcdefghijklmno");
        assert_eq!(e.handle_key(NameKey::Char('z')), NameEntryAction::Ignored);
    }

    #[test]
    fn test_enter_submits_once() {
        let mut e = NameEntry::new();
        assert_eq!(
            e.handle_key(NameKey::Enter),
            NameEntryAction::Submit("Anonymous".to_string())
        );
        assert!(e.is_submitted());
        assert_eq!(e.handle_key(NameKey::Enter), NameEntryAction::Ignored);
        assert_eq!(e.handle_key(NameKey::Char('a')), NameEntryAction::Ignored);
    }

    #[test]
    fn test_control_chars_ignored() {
        let mut e = NameEntry::new();
        assert_eq!(e.handle_key(NameKey::Char('\t')), NameEntryAction::Ignored);
        assert_eq!(e.handle_key(NameKey::Backspace), NameEntryAction::Ignored);
    }
}
