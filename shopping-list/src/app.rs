//! The shopping list screen
//!
//! Event (key) -> keybinding or focused component -> [`UiAction`] ->
//! [`App::update`] -> controller -> intent on the action channel.
//! The store's owner applies the intent, and [`App::sync`] picks up the new
//! list from the controller's subscription.

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};
use shopping_list_core::{DispatchError, EventKind, IdGenerator, ShoppingController, ShoppingList};
use tracing::debug;

use crate::action::UiAction;
use crate::components::{
    Component, HelpBar, HelpBarProps, ItemList, ItemListProps, TextInput, TextInputProps,
};
use crate::keybindings::{Command, KeyContext, Keybindings};

/// Which component receives keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Input,
    List,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Input => Focus::List,
            Focus::List => Focus::Input,
        }
    }

    pub fn context(self) -> KeyContext {
        match self {
            Focus::Input => KeyContext::Input,
            Focus::List => KeyContext::List,
        }
    }
}

pub struct App<G: IdGenerator> {
    controller: ShoppingController<G>,
    keybindings: Keybindings,
    placeholder: String,
    /// Last list published by the store
    items: ShoppingList,
    focus: Focus,
    selected: usize,
    should_quit: bool,
    input: TextInput,
    list: ItemList,
    help: HelpBar,
}

impl<G: IdGenerator> App<G> {
    pub fn new(
        controller: ShoppingController<G>,
        keybindings: Keybindings,
        placeholder: impl Into<String>,
    ) -> Self {
        let items = controller.items();
        Self {
            controller,
            keybindings,
            placeholder: placeholder.into(),
            items,
            focus: Focus::default(),
            selected: 0,
            should_quit: false,
            input: TextInput::new(),
            list: ItemList::new(),
            help: HelpBar,
        }
    }

    pub fn items(&self) -> &ShoppingList {
        &self.items
    }

    pub fn draft_name(&self) -> &str {
        &self.controller.draft().name
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Map an event to UI actions
    ///
    /// Keybindings are checked first, then the focused component.
    pub fn handle_event(&mut self, event: &EventKind) -> Vec<UiAction> {
        if let EventKind::Key(key) = event {
            if let Some(command) = self.keybindings.command_for(key, self.focus.context()) {
                return self.command_action(command).into_iter().collect();
            }
        }

        match self.focus {
            Focus::Input => {
                let props = TextInputProps {
                    value: &self.controller.draft().name,
                    placeholder: &self.placeholder,
                    title: "New item",
                    is_focused: true,
                    on_change: UiAction::DraftChange,
                };
                self.input.handle_event(event, props).into_iter().collect()
            }
            Focus::List => {
                let props = ItemListProps {
                    items: &self.items,
                    selected: self.selected,
                    is_focused: true,
                    on_select: UiAction::ItemSelect,
                };
                self.list.handle_event(event, props).into_iter().collect()
            }
        }
    }

    fn command_action(&self, command: Command) -> Option<UiAction> {
        match command {
            Command::Quit => Some(UiAction::Quit),
            Command::FocusNext => Some(UiAction::FocusNext),
            Command::FocusPrev => Some(UiAction::FocusPrev),
            Command::Add => Some(UiAction::DraftSubmit),
            Command::Delete if self.selected < self.items.len() => {
                Some(UiAction::ItemDelete(self.selected))
            }
            Command::Delete => None,
        }
    }

    /// Apply a UI action
    ///
    /// Returns `true` if the screen needs redrawing. List changes arrive
    /// later through [`App::sync`].
    pub fn update(&mut self, action: UiAction) -> Result<bool, DispatchError> {
        match action {
            UiAction::DraftChange(name) => {
                self.controller.set_draft_name(name);
                Ok(true)
            }
            UiAction::DraftSubmit => {
                let item = self.controller.add_item()?;
                debug!(id = %item.id, "Item submitted");
                self.input.reset();
                Ok(true)
            }
            UiAction::ItemSelect(index) => {
                let changed = self.selected != index;
                self.selected = index;
                Ok(changed)
            }
            UiAction::ItemDelete(index) => {
                if let Some(item) = self.items.get(index) {
                    self.controller.delete_item(item)?;
                }
                Ok(false)
            }
            UiAction::FocusNext | UiAction::FocusPrev => {
                self.focus = self.focus.toggle();
                Ok(true)
            }
            UiAction::Quit => {
                self.should_quit = true;
                Ok(false)
            }
        }
    }

    /// Apply every pending list notification, oldest first
    ///
    /// Returns `true` if the screen needs redrawing.
    pub fn sync(&mut self) -> bool {
        let mut updated = false;
        while let Some(items) = self.controller.poll_changed() {
            self.items = items;
            updated = true;
        }
        if updated {
            self.selected = self.selected.min(self.items.len().saturating_sub(1));
        }
        updated
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let [input_area, list_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let input_props = TextInputProps {
            value: &self.controller.draft().name,
            placeholder: &self.placeholder,
            title: "New item",
            is_focused: self.focus == Focus::Input,
            on_change: UiAction::DraftChange,
        };
        self.input.render(frame, input_area, input_props);

        let list_props = ItemListProps {
            items: &self.items,
            selected: self.selected,
            is_focused: self.focus == Focus::List,
            on_select: UiAction::ItemSelect,
        };
        self.list.render(frame, list_area, list_props);

        let help_props = HelpBarProps {
            keybindings: &self.keybindings,
            context: self.focus.context(),
        };
        self.help.render(frame, help_area, help_props);
    }
}
