//! Main menu screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::console::traits::{Navigable, ScreenAction};
use crate::console::ui::Styles;
use crate::i18n::Translate;
use crate::models::Resource;

/// Main menu options
#[derive(Debug, Clone)]
pub struct MenuOption {
    pub title: String,
    pub description: &'static str,
    pub shortcut: char,
    pub resource: Resource,
}

/// Main menu screen state
pub struct MainMenuScreen {
    pub menu_state: ListState,
    pub menu_options: Vec<MenuOption>,
    signed_in: bool,
}

impl MainMenuScreen {
    pub fn new(translate: &dyn Translate, signed_in: bool) -> Self {
        let menu_options = Resource::ALL
            .iter()
            .map(|&resource| {
                let (shortcut, description) = match resource {
                    Resource::Companies => ('c', "Tenant companies and their status"),
                    Resource::Applications => ('a', "Client applications registered per company"),
                    Resource::Users => ('u', "User accounts across all companies"),
                    Resource::MasterData => ('m', "Code lists shared by every tenant"),
                };
                MenuOption {
                    title: translate.translate(resource.title_key()),
                    description,
                    shortcut,
                    resource,
                }
            })
            .collect();

        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        Self {
            menu_state,
            menu_options,
            signed_in,
        }
    }

    /// Handle key events for the main menu
    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Up => self.navigate_up(),
            KeyCode::Down => self.navigate_down(),
            KeyCode::Home => self.navigate_to_first(),
            KeyCode::End => self.navigate_to_last(),
            KeyCode::Enter => {
                if let Some(option) = self
                    .menu_state
                    .selected()
                    .and_then(|i| self.menu_options.get(i))
                {
                    return ScreenAction::Open(option.resource);
                }
            }
            KeyCode::Esc => return ScreenAction::Quit,
            KeyCode::Char(c) => {
                let c = c.to_ascii_lowercase();
                if let Some(option) = self.menu_options.iter().find(|o| o.shortcut == c) {
                    return ScreenAction::Open(option.resource);
                }
            }
            _ => {}
        }
        ScreenAction::None
    }

    /// Draw the main menu screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Menu
                Constraint::Length(4), // Instructions
            ])
            .split(area);

        let title = Paragraph::new("Tenant Administration Console")
            .style(Styles::title().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .menu_options
            .iter()
            .map(|option| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("[{}] ", option.shortcut), Styles::info()),
                        Span::styled(option.title.clone(), Styles::title()),
                    ]),
                    Line::from(Span::styled(format!("    {}", option.description), Styles::inactive())),
                ])
            })
            .collect();
        let menu = List::new(items)
            .block(Block::default().title("Resources").borders(Borders::ALL))
            .highlight_style(Styles::selected());
        f.render_stateful_widget(menu, chunks[1], &mut self.menu_state);

        let session_line = if self.signed_in {
            Line::from(Span::styled("Signed in with API token", Styles::success()))
        } else {
            Line::from(Span::styled(
                "No API token set (CONSOLE_API_TOKEN); requests are anonymous",
                Styles::warning(),
            ))
        };
        let instructions = Paragraph::new(vec![
            Line::from("↑/↓: Navigate | Enter: Open | c/a/u/m: Shortcuts | q: Quit"),
            session_line,
        ])
        .style(Styles::info())
        .block(Block::default().borders(Borders::TOP));
        f.render_widget(instructions, chunks[2]);
    }
}

impl Navigable for MainMenuScreen {
    fn navigate_up(&mut self) {
        let selected = self.menu_state.selected().unwrap_or(0);
        let count = self.get_item_count();
        let new_selected = if selected == 0 { count.saturating_sub(1) } else { selected - 1 };
        self.menu_state.select(Some(new_selected));
    }

    fn navigate_down(&mut self) {
        let count = self.get_item_count().max(1);
        let selected = self.menu_state.selected().unwrap_or(0);
        self.menu_state.select(Some((selected + 1) % count));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.menu_state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.menu_state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.menu_options.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_menu_wraps_and_opens() {
        let mut menu = MainMenuScreen::new(&Catalog::english(), false);
        assert_eq!(menu.menu_options[3].title, "Master Data");

        menu.handle_key(key(KeyCode::Up));
        assert_eq!(menu.get_selected_index(), Some(3));
        assert_eq!(menu.handle_key(key(KeyCode::Enter)), ScreenAction::Open(Resource::MasterData));

        menu.navigate_down();
        assert_eq!(menu.get_selected_index(), Some(0));

        menu.handle_key(key(KeyCode::End));
        assert_eq!(menu.get_selected_index(), Some(3));
        menu.handle_key(key(KeyCode::Home));
        assert_eq!(menu.get_selected_index(), Some(0));
    }

    #[test]
    fn test_shortcuts() {
        let mut menu = MainMenuScreen::new(&Catalog::english(), true);
        assert_eq!(menu.handle_key(key(KeyCode::Char('U'))), ScreenAction::Open(Resource::Users));
        assert_eq!(menu.handle_key(key(KeyCode::Char('z'))), ScreenAction::None);
    }
}
