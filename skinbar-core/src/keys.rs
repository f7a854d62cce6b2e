// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyboard model for menu navigation, accelerator labels and mnemonics.

use bitflags::bitflags;

/// A key delivered to the menu engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Home.
    Home,
    /// End.
    End,
    /// Alt (or Option) on its own.
    Alt,
    /// A printable character.
    Character(char),
    /// Anything the menus do not care about.
    Other,
}

impl Key {
    /// The lower-cased letter or digit this key produces, if any.
    pub fn mnemonic_char(&self) -> Option<char> {
        match self {
            Key::Character(c) if c.is_alphanumeric() => c.to_lowercase().next(),
            _ => None,
        }
    }
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CONTROL = 0b0010;
        /// Alt / Option.
        const ALT = 0b0100;
        /// Super / Command / Windows.
        const SUPER = 0b1000;
    }
}

/// A label split into display text and mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnemonicText {
    /// Label with `&` markers removed.
    pub display_text: String,
    /// Mnemonic character, lower-cased.
    pub mnemonic: Option<char>,
    /// Char index of the mnemonic within `display_text`.
    pub mnemonic_index: Option<usize>,
}

/// Split a label such as `&File` into display text and mnemonic.
///
/// `&&` yields a literal ampersand. Only the first `&x` marks a mnemonic.
pub fn parse_mnemonic(text: &str) -> MnemonicText {
    let mut display_text = String::with_capacity(text.len());
    let mut mnemonic = None;
    let mut mnemonic_index = None;
    let mut count = 0usize;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '&' {
            display_text.push(ch);
            count += 1;
            continue;
        }
        match chars.peek().copied() {
            Some('&') => {
                display_text.push('&');
                count += 1;
                chars.next();
            },
            Some(next) if next.is_alphanumeric() => {
                if mnemonic.is_none() {
                    mnemonic = next.to_lowercase().next();
                    mnemonic_index = Some(count);
                }
                display_text.push(next);
                count += 1;
                chars.next();
            },
            _ => {
                display_text.push('&');
                count += 1;
            },
        }
    }

    MnemonicText {
        display_text,
        mnemonic,
        mnemonic_index,
    }
}

/// Render an Electron style accelerator (`CmdOrCtrl+Shift+N`) for display.
pub fn format_accelerator(accelerator: &str) -> String {
    accelerator
        .split('+')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.to_ascii_lowercase().as_str() {
            "cmdorctrl" | "commandorcontrol" | "ctrl" | "control" => "Ctrl".to_string(),
            "cmd" | "command" | "super" | "meta" => "Super".to_string(),
            "alt" | "option" | "altgr" => "Alt".to_string(),
            "shift" => "Shift".to_string(),
            "esc" | "escape" => "Esc".to_string(),
            "return" | "enter" => "Enter".to_string(),
            "plus" => "+".to_string(),
            "up" => "Up".to_string(),
            "down" => "Down".to_string(),
            "left" => "Left".to_string(),
            "right" => "Right".to_string(),
            _ if part.chars().count() == 1 => part.to_uppercase(),
            _ => part.to_string(),
        })
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mnemonic() {
        let parsed = parse_mnemonic("&File");
        assert_eq!(parsed.display_text, "File");
        assert_eq!(parsed.mnemonic, Some('f'));
        assert_eq!(parsed.mnemonic_index, Some(0));

        let parsed = parse_mnemonic("Save &As...");
        assert_eq!(parsed.display_text, "Save As...");
        assert_eq!(parsed.mnemonic, Some('a'));
        assert_eq!(parsed.mnemonic_index, Some(5));
    }

    #[test]
    fn test_parse_mnemonic_escapes() {
        let parsed = parse_mnemonic("Tom && &Jerry");
        assert_eq!(parsed.display_text, "Tom & Jerry");
        assert_eq!(parsed.mnemonic, Some('j'));

        let parsed = parse_mnemonic("Trailing &");
        assert_eq!(parsed.display_text, "Trailing &");
        assert_eq!(parsed.mnemonic, None);

        let parsed = parse_mnemonic("&One &Two");
        assert_eq!(parsed.mnemonic, Some('o'));
    }

    #[test]
    fn test_format_accelerator() {
        assert_eq!(format_accelerator("CmdOrCtrl+Shift+n"), "Ctrl+Shift+N");
        assert_eq!(format_accelerator("Alt+F4"), "Alt+F4");
        assert_eq!(format_accelerator("CommandOrControl+Plus"), "Ctrl++");
    }

    #[test]
    fn test_mnemonic_char() {
        assert_eq!(Key::Character('N').mnemonic_char(), Some('n'));
        assert_eq!(Key::Character('-').mnemonic_char(), None);
        assert_eq!(Key::Enter.mnemonic_char(), None);
    }
}
