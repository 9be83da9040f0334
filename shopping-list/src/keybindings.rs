//! Context-aware keybindings
//!
//! Bindings map commands to key strings per context. Lookups try the
//! focused context first and fall back to `global`.
//!
//! In TOML:
//!
//! ```toml
//! [keybindings.global]
//! quit = ["esc", "ctrl+c"]
//!
//! [keybindings.list]
//! delete = ["d", "x"]
//! ```

use std::collections::HashMap;

use crossterm::event::KeyEvent;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shopping_list_core::{format_key_for_display, key_matches, parse_key_string};

/// Where a binding applies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    Input,
    List,
}

impl KeyContext {
    pub const ALL: [KeyContext; 3] = [KeyContext::Global, KeyContext::Input, KeyContext::List];

    pub fn name(&self) -> &'static str {
        match self {
            KeyContext::Global => "global",
            KeyContext::Input => "input",
            KeyContext::List => "list",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ctx| ctx.name() == name)
    }
}

/// Something a key can trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    FocusNext,
    FocusPrev,
    Add,
    Delete,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Quit,
        Command::FocusNext,
        Command::FocusPrev,
        Command::Add,
        Command::Delete,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Quit => "quit",
            Command::FocusNext => "focus_next",
            Command::FocusPrev => "focus_prev",
            Command::Add => "add",
            Command::Delete => "delete",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }
}

type Bindings = HashMap<Command, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keybindings {
    contexts: HashMap<KeyContext, Bindings>,
}

impl Keybindings {
    /// Create an empty keybindings table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings the app ships with
    pub fn defaults() -> Self {
        let mut bindings = Self::new();
        bindings.add(KeyContext::Global, Command::Quit, &["esc", "ctrl+c"]);
        bindings.add(KeyContext::Global, Command::FocusNext, &["tab"]);
        bindings.add(KeyContext::Global, Command::FocusPrev, &["shift+tab"]);
        bindings.add(KeyContext::Input, Command::Add, &["enter"]);
        bindings.add(KeyContext::List, Command::Delete, &["d", "delete", "backspace"]);
        bindings
    }

    /// Bind `command` to `keys` in `context`, replacing earlier keys
    pub fn add(&mut self, context: KeyContext, command: Command, keys: &[&str]) {
        self.contexts
            .entry(context)
            .or_default()
            .insert(command, keys.iter().map(|k| k.to_string()).collect());
    }

    /// Keys bound to `command` directly in `context`
    pub fn keys(&self, context: KeyContext, command: Command) -> Option<&[String]> {
        self.contexts
            .get(&context)
            .and_then(|bindings| bindings.get(&command))
            .map(Vec::as_slice)
    }

    /// Command for a key press in the given context
    ///
    /// Context bindings win over global ones.
    pub fn command_for(&self, key: &KeyEvent, context: KeyContext) -> Option<Command> {
        if context != KeyContext::Global {
            if let Some(cmd) = self.match_in(key, context) {
                return Some(cmd);
            }
        }
        self.match_in(key, KeyContext::Global)
    }

    fn match_in(&self, key: &KeyEvent, context: KeyContext) -> Option<Command> {
        let bindings = self.contexts.get(&context)?;
        // Iterate commands in a fixed order so overlapping bindings resolve the same way every run
        Command::ALL.into_iter().find(|cmd| {
            bindings.get(cmd).is_some_and(|keys| {
                keys.iter()
                    .filter_map(|k| parse_key_string(k))
                    .any(|binding| key_matches(&binding, key))
            })
        })
    }

    /// Display label for the first key of `command`, e.g. "^D" or "Tab"
    pub fn hint(&self, command: Command, context: KeyContext) -> Option<String> {
        self.keys(context, command)
            .or_else(|| self.keys(KeyContext::Global, command))
            .and_then(|keys| keys.first())
            .map(|k| format_key_for_display(k))
    }

    /// Key strings that do not parse, as `context.command = key`
    pub fn invalid_keys(&self) -> Vec<String> {
        let mut invalid = Vec::new();
        for context in KeyContext::ALL {
            let Some(bindings) = self.contexts.get(&context) else {
                continue;
            };
            for command in Command::ALL {
                for key in bindings.get(&command).into_iter().flatten() {
                    if parse_key_string(key).is_none() {
                        invalid.push(format!("{}.{} = {:?}", context.name(), command.name(), key));
                    }
                }
            }
        }
        invalid
    }

    /// Merge user config onto defaults - user config overrides defaults
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        for (context, bindings) in user.contexts {
            defaults.contexts.entry(context).or_default().extend(bindings);
        }
        defaults
    }
}

impl Serialize for Keybindings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.contexts.len()))?;
        for context in KeyContext::ALL {
            let Some(bindings) = self.contexts.get(&context) else {
                continue;
            };
            let named: std::collections::BTreeMap<&str, &Vec<String>> = bindings
                .iter()
                .map(|(cmd, keys)| (cmd.name(), keys))
                .collect();
            map.serialize_entry(context.name(), &named)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Keybindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, HashMap<String, Vec<String>>> =
            HashMap::deserialize(deserializer)?;

        let mut keybindings = Keybindings::new();
        for (context_name, bindings) in raw {
            // Unknown contexts and commands are skipped so newer configs still load
            let Some(context) = KeyContext::from_name(&context_name) else {
                tracing::warn!(context = %context_name, "Ignoring unknown keybinding context");
                continue;
            };
            let entry = keybindings.contexts.entry(context).or_default();
            for (command_name, keys) in bindings {
                match Command::from_name(&command_name) {
                    Some(command) => {
                        entry.insert(command, keys);
                    }
                    None => {
                        tracing::warn!(command = %command_name, "Ignoring unknown command");
                    }
                }
            }
        }
        Ok(keybindings)
    }
}
