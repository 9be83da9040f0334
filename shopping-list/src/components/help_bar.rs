use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use shopping_list_core::Component;

use crate::action::UiAction;
use crate::keybindings::{Command, KeyContext, Keybindings};

pub struct HelpBar;

pub struct HelpBarProps<'a> {
    pub keybindings: &'a Keybindings,
    /// Context of the focused component
    pub context: KeyContext,
}

impl HelpBar {
    fn hints(props: &HelpBarProps<'_>) -> Vec<(String, &'static str)> {
        let mut commands = vec![];
        match props.context {
            KeyContext::Input => commands.push((Command::Add, "add")),
            KeyContext::List => commands.push((Command::Delete, "delete")),
            KeyContext::Global => {}
        }
        commands.push((Command::FocusNext, "switch"));
        commands.push((Command::Quit, "quit"));

        commands
            .into_iter()
            .filter_map(|(cmd, label)| {
                props
                    .keybindings
                    .hint(cmd, props.context)
                    .map(|key| (key, label))
            })
            .collect()
    }
}

impl Component<UiAction> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let spans: Vec<Span> = Self::hints(&props)
            .into_iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {}", key), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
