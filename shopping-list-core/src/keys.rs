//! Key string parsing ("q", "esc", "ctrl+d", "shift+tab") and display

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

/// Parse a key string like "q", "esc", "ctrl+p", "shift+tab" into a KeyEvent
///
/// Names are case-insensitive. Returns `None` for anything unrecognised.
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    // "+" alone is a key, not a separator
    let (mods, key_part) = match key_str.rsplit_once('+') {
        Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(""), "+"),
        Some((mods, key)) => (mods, key),
        None => ("", key_str.as_str()),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in mods.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match part {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "backtab" => {
            modifiers |= KeyModifiers::SHIFT;
            KeyCode::BackTab
        }
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" | "del" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return None,
        },
        c => {
            let mut chars = c.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Whether a pressed key matches a parsed binding
///
/// Kind and state are ignored; characters compare case-insensitively.
/// Shift is ignored for characters since terminals disagree on reporting it.
pub fn key_matches(binding: &KeyEvent, pressed: &KeyEvent) -> bool {
    match (binding.code, pressed.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) => {
            let relevant = KeyModifiers::CONTROL | KeyModifiers::ALT;
            a.to_lowercase().eq(b.to_lowercase())
                && (binding.modifiers & relevant) == (pressed.modifiers & relevant)
        }
        (a, b) => a == b && binding.modifiers == pressed.modifiers,
    }
}

/// Format a key string for display (e.g., "ctrl+d" -> "^D", "tab" -> "Tab")
pub fn format_key_for_display(key_str: &str) -> String {
    let Some(parsed) = parse_key_string(key_str) else {
        return key_str.trim().to_string();
    };

    let mut out = String::new();
    if parsed.modifiers.contains(KeyModifiers::CONTROL) {
        out.push('^');
    }
    if parsed.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    if parsed.modifiers.contains(KeyModifiers::SHIFT) {
        out.push_str("Shift+");
    }

    let key = match parsed.code {
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Insert => "Ins".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().collect(),
        other => format!("{:?}", other),
    };
    out.push_str(&key);
    out
}
