//! Device-to-channel binding tables. Resolution only; polling the devices
//! belongs to the presentation layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tactus_domain::Channel;

/// Maps raw device identifiers to channels. The defaults mirror the standard
/// four-button rig; callers may replace any table wholesale.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeviceBindings {
    /// Keyed by lowercase character.
    pub keyboard: HashMap<char, Channel>,
    /// Keyed by MIDI note number; note-on filtering is the caller's job.
    pub midi_notes: HashMap<u8, Channel>,
    pub hid_buttons: HashMap<u8, Channel>,
    pub gamepad_buttons: HashMap<u8, Channel>,
}

impl Default for DeviceBindings {
    fn default() -> Self {
        Self {
            keyboard: HashMap::from([
                ('e', Channel::LeftHand),
                ('i', Channel::RightHand),
                ('x', Channel::LeftFoot),
                ('n', Channel::RightFoot),
            ]),
            midi_notes: HashMap::from([
                (60, Channel::LeftHand),
                (62, Channel::RightHand),
                (64, Channel::LeftFoot),
                (65, Channel::RightFoot),
            ]),
            hid_buttons: HashMap::from([
                (0, Channel::LeftHand),
                (1, Channel::RightHand),
                (2, Channel::LeftFoot),
                (3, Channel::RightFoot),
            ]),
            gamepad_buttons: HashMap::from([
                (0, Channel::LeftHand),
                (1, Channel::RightHand),
                (2, Channel::LeftFoot),
                (3, Channel::RightFoot),
            ]),
        }
    }
}

impl DeviceBindings {
    pub fn resolve_key(&self, key: char) -> Option<Channel> {
        self.keyboard.get(&key.to_ascii_lowercase()).copied()
    }

    pub fn resolve_midi_note(&self, note: u8) -> Option<Channel> {
        self.midi_notes.get(&note).copied()
    }

    pub fn resolve_hid_button(&self, button: u8) -> Option<Channel> {
        self.hid_buttons.get(&button).copied()
    }

    pub fn resolve_gamepad_button(&self, button: u8) -> Option<Channel> {
        self.gamepad_buttons.get(&button).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keyboard_bindings_ignore_case() {
        let bindings = DeviceBindings::default();
        assert_eq!(bindings.resolve_key('e'), Some(Channel::LeftHand));
        assert_eq!(bindings.resolve_key('E'), Some(Channel::LeftHand));
        assert_eq!(bindings.resolve_key('n'), Some(Channel::RightFoot));
        assert_eq!(bindings.resolve_key('q'), None);
    }

    #[test]
    fn default_midi_bindings_follow_middle_c() {
        let bindings = DeviceBindings::default();
        assert_eq!(bindings.resolve_midi_note(60), Some(Channel::LeftHand));
        assert_eq!(bindings.resolve_midi_note(65), Some(Channel::RightFoot));
        assert_eq!(bindings.resolve_midi_note(66), None);
    }

    #[test]
    fn tables_can_be_rebound() {
        let mut bindings = DeviceBindings::default();
        bindings.keyboard.insert('a', Channel::LeftHand);
        assert_eq!(bindings.resolve_key('a'), Some(Channel::LeftHand));
        assert_eq!(bindings.resolve_gamepad_button(2), Some(Channel::LeftFoot));
    }
}
