//! Scrollable list of shopping items

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use shopping_list_core::{Component, EventKind, ShoppingItem};

/// Props for ItemList component
pub struct ItemListProps<'a, A> {
    /// Items to display, in list order
    pub items: &'a [ShoppingItem],
    /// Currently highlighted index
    pub selected: usize,
    /// Whether this component has focus
    pub is_focused: bool,
    /// Callback to create action when the highlight moves
    pub on_select: fn(usize) -> A,
}

/// Keyboard-navigable list of item names
///
/// Handles j/k/up/down/g/G/home/end and the scroll wheel. Deleting is a
/// keybinding resolved by the app.
#[derive(Default)]
pub struct ItemList {
    /// Scroll offset for viewport
    scroll_offset: usize,
}

impl ItemList {
    /// Create a new ItemList
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the selected index is visible within the viewport
    fn ensure_visible(&mut self, selected: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }

        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + viewport_height {
            self.scroll_offset = selected.saturating_sub(viewport_height - 1);
        }
    }

    fn target(&self, event: &EventKind, selected: usize, last: usize) -> Option<usize> {
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some((selected + 1).min(last)),
                KeyCode::Char('k') | KeyCode::Up => Some(selected.saturating_sub(1)),
                KeyCode::Char('g') | KeyCode::Home => Some(0),
                KeyCode::Char('G') | KeyCode::End => Some(last),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => {
                Some(selected.saturating_add_signed(*delta).min(last))
            }
            _ => None,
        }
    }
}

impl<A> Component<A> for ItemList {
    type Props<'a> = ItemListProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused || props.items.is_empty() {
            return None;
        }

        let last = props.items.len() - 1;
        self.target(event, props.selected.min(last), last)
            .filter(|&idx| idx != props.selected)
            .map(props.on_select)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border_style = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(format!(" Shopping list ({}) ", props.items.len()))
            .borders(Borders::ALL)
            .border_style(border_style);

        if props.items.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "Nothing to buy",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let viewport_height = area.height.saturating_sub(2) as usize;
        let selected = props.selected.min(props.items.len() - 1);
        self.ensure_visible(selected, viewport_height);

        let items: Vec<ListItem> = props
            .items
            .iter()
            .map(|item| {
                // Empty names are allowed; keep the row visible
                let label = if item.name.is_empty() {
                    Span::styled("(unnamed)", Style::default().fg(Color::DarkGray))
                } else {
                    Span::raw(item.name.as_str())
                };
                ListItem::new(Line::from(label))
            })
            .collect();

        let highlight = if props.is_focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(selected));
        *state.offset_mut() = self.scroll_offset;

        frame.render_stateful_widget(list, area, &mut state);
    }
}
