//! Single-line input for the draft item name

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use shopping_list_core::{Component, EventKind};

/// Props for TextInput component
pub struct TextInputProps<'a, A> {
    /// Current input value
    pub value: &'a str,
    /// Placeholder text when empty
    pub placeholder: &'a str,
    /// Border title
    pub title: &'a str,
    /// Whether this component has focus
    pub is_focused: bool,
    /// Callback when value changes
    pub on_change: fn(String) -> A,
}

/// A single-line text input with cursor
///
/// Handles typing, backspace, delete, and cursor movement, emitting
/// `on_change` for each edit. Submission is a keybinding, not handled here.
#[derive(Default)]
pub struct TextInput {
    /// Cursor position (byte index)
    cursor: usize,
}

impl TextInput {
    /// Create a new TextInput
    pub fn new() -> Self {
        Self::default()
    }

    /// Put the cursor back at the start, e.g. after the draft resets
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn prev_boundary(&self, value: &str) -> usize {
        value[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self, value: &str) -> usize {
        value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        new_value
    }

    /// Backspace
    fn delete_char_before(&mut self, value: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        let start = self.prev_boundary(value);
        let new_value = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(new_value)
    }

    /// Delete key
    fn delete_char_at(&self, value: &str) -> Option<String> {
        if self.cursor >= value.len() {
            return None;
        }
        let end = self.next_boundary(value);
        Some(format!("{}{}", &value[..self.cursor], &value[end..]))
    }

    /// Cursor column in terminal cells (chars before the cursor)
    fn cursor_column(&self, value: &str) -> u16 {
        value[..self.cursor].chars().count() as u16
    }
}

impl<A> Component<A> for TextInput {
    type Props<'a> = TextInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }

        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                // Ctrl+A: move to start
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                // Ctrl+E: move to end
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                // Ctrl+U: clear line
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some((props.on_change)(self.insert_char(props.value, c))),
            KeyCode::Backspace => self.delete_char_before(props.value).map(props.on_change),
            KeyCode::Delete => self.delete_char_at(props.value).map(props.on_change),
            KeyCode::Left => {
                self.cursor = self.prev_boundary(props.value);
                None
            }
            KeyCode::Right => {
                self.cursor = self.next_boundary(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        let (text, style) = if props.value.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (props.value, Style::default())
        };

        let border_style = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let paragraph = Paragraph::new(text).style(style).block(
            Block::default()
                .title(format!(" {} ", props.title))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(paragraph, area);

        if props.is_focused {
            let cursor_x = area.x + 1 + self.cursor_column(props.value);
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopping_list_core::testing::{ctrl_key, key, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Change(String),
    }

    fn props(value: &str, is_focused: bool) -> TextInputProps<'_, TestAction> {
        TextInputProps {
            value,
            placeholder: "Add an item...",
            title: "New item",
            is_focused,
            on_change: TestAction::Change,
        }
    }

    fn press(input: &mut TextInput, value: &str, k: &str) -> Vec<TestAction> {
        input
            .handle_event(&EventKind::Key(key(k)), props(value, true))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing() {
        let mut input = TextInput::new();
        assert_eq!(press(&mut input, "", "a"), vec![TestAction::Change("a".into())]);
    }

    #[test]
    fn test_typing_appends() {
        let mut input = TextInput::new();
        input.cursor = 4;
        assert_eq!(
            press(&mut input, "Milk", "s"),
            vec![TestAction::Change("Milks".into())]
        );
    }

    #[test]
    fn test_backspace() {
        let mut input = TextInput::new();
        input.cursor = 4;
        assert_eq!(
            press(&mut input, "Milk", "backspace"),
            vec![TestAction::Change("Mil".into())]
        );
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = TextInput::new();
        assert!(press(&mut input, "Milk", "backspace").is_empty());
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new();
        input.cursor = "Café".len();

        assert_eq!(
            press(&mut input, "Café", "backspace"),
            vec![TestAction::Change("Caf".into())]
        );

        input.cursor = 0;
        press(&mut input, "Éclair", "right");
        assert_eq!(input.cursor, 'É'.len_utf8());
        assert_eq!(
            press(&mut input, "Éclair", "delete"),
            vec![TestAction::Change("Élair".into())]
        );
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::new();
        input.cursor = 4;
        let actions: Vec<_> = input
            .handle_event(&EventKind::Key(ctrl_key('u')), props("Milk", true))
            .into_iter()
            .collect();
        assert_eq!(actions, vec![TestAction::Change(String::new())]);
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_enter_is_not_handled() {
        let mut input = TextInput::new();
        assert!(press(&mut input, "Milk", "enter").is_empty());
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut input = TextInput::new();
        let actions: Vec<_> = input
            .handle_event(&EventKind::Key(key("a")), props("", false))
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_render_with_value() {
        let mut render = RenderHarness::new(30, 3);
        let mut input = TextInput::new();

        let output = render.render_to_string_plain(|frame| {
            input.render(frame, frame.area(), props("Milk", true));
        });

        assert!(output.contains("Milk"));
        assert!(output.contains("New item"));
    }

    #[test]
    fn test_render_placeholder() {
        let mut render = RenderHarness::new(30, 3);
        let mut input = TextInput::new();

        let output = render.render_to_string_plain(|frame| {
            input.render(frame, frame.area(), props("", false));
        });

        assert!(output.contains("Add an item..."));
    }
}
