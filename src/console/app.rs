//! Main console application state and event loop

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, info};

use super::screens::{open_panel, MainMenuScreen, PanelContext};
use super::traits::{Panel, ScreenAction};
use super::ui::centered_rect;
use crate::i18n::Translate;
use crate::models::Resource;

/// Where the console is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Menu,
    List(Resource),
}

/// Main console application state
pub struct App {
    /// Current route
    pub route: Route,
    context: PanelContext,
    main_menu: MainMenuScreen,
    /// The mounted resource list; replaced on every navigation
    panel: Option<Box<dyn Panel>>,

    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    pub fn new(context: PanelContext) -> Self {
        let signed_in = context.client.session().is_authenticated();
        let main_menu = MainMenuScreen::new(&context.catalog, signed_in);
        Self {
            route: Route::Menu,
            context,
            main_menu,
            panel: None,
            should_quit: false,
            show_help_popup: false,
            status_message: None,
            error_message: None,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if self.should_quit {
                break;
            }

            // queued API work runs between frames so its progress is drawn first
            if self.panel.as_ref().is_some_and(|panel| panel.has_pending_work()) {
                self.process_panel().await;
                continue;
            }

            if event::poll(Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn process_panel(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            let action = panel.process().await;
            self.apply(action);
        }
    }

    /// Navigate to `route`, unmounting the current list
    pub fn navigate(&mut self, route: Route) {
        debug!("Navigating from {:?} to {:?}", self.route, route);
        self.panel = match route {
            Route::Menu => None,
            Route::List(resource) => Some(open_panel(resource, &self.context)),
        };
        self.route = route;
        self.clear_messages();
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let capturing_text = self.panel.as_ref().is_some_and(|panel| panel.is_capturing_text());
        if !capturing_text {
            match key.code {
                KeyCode::F(1) | KeyCode::Char('?') => {
                    self.show_help_popup = !self.show_help_popup;
                    return;
                }
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                _ => {}
            }
        }
        if self.show_help_popup {
            if key.code == KeyCode::Esc {
                self.show_help_popup = false;
            }
            return;
        }

        let action = match self.panel.as_mut() {
            Some(panel) => panel.handle_key(key),
            None => self.main_menu.handle_key(key),
        };
        self.apply(action);
    }

    /// Handle mouse input events; only lists react to the mouse
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if self.show_help_popup {
            if mouse.kind == MouseEventKind::Up(MouseButton::Left) {
                if let Some(panel) = self.panel.as_mut() {
                    panel.end_drag();
                }
            }
            return;
        }
        if let Some(panel) = self.panel.as_mut() {
            let action = panel.handle_mouse(mouse);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::Open(resource) => {
                info!("Opening {}", resource);
                self.navigate(Route::List(resource));
            }
            ScreenAction::NavigateBack => self.navigate(Route::Menu),
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::SetStatus(message) => self.set_status(message),
            ScreenAction::SetError(message) => self.set_error(message),
            ScreenAction::ClearMessages => self.clear_messages(),
            ScreenAction::None => {}
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        match self.panel.as_mut() {
            Some(panel) => panel.draw(f, chunks[0]),
            None => self.main_menu.draw(f, chunks[0]),
        }

        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw status bar with current screen info and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(ref err) = self.error_message {
            format!("Error: {}", err)
        } else if let Some(ref msg) = self.status_message {
            format!("Status: {}", msg)
        } else {
            let location = match self.route {
                Route::Menu => "Main Menu".to_string(),
                Route::List(resource) => self.context.catalog.translate(resource.title_key()),
            };
            format!("tenant-console - {} | ESC: Back | Q: Quit | F1/?: Help", location)
        };

        let style = if self.error_message.is_some() {
            Style::default().fg(Color::Red)
        } else if self.status_message.is_some() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status_bar, area);
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(80, 70, area);
        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.context_help())
            .block(
                Block::default()
                    .title("Help - Context Shortcuts")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));
        f.render_widget(help_popup, popup_area);
    }

    fn context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            Q - Quit application\n\
            Ctrl+C - Quit immediately\n\
            F1 / ? - Toggle this help\n\n";

        let screen_help = match &self.panel {
            Some(panel) => panel.help(),
            None => {
                "Main Menu:\n\
                ↑/↓ - Navigate menu\n\
                Enter - Open resource list\n\
                c/a/u/m - Companies, Applications, Users, Master Data\n\
                ESC - Quit"
            }
        };

        format!("{}{}", global_help, screen_help)
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::config::Config;
    use crate::i18n::Catalog;
    use crate::session::Session;
    use crate::table::{NoopSurface, PageSize};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn app() -> App {
        let client = ApiClient::new(&Config::default(), Session::default()).unwrap();
        App::new(PanelContext {
            client,
            catalog: Catalog::english(),
            page_size: PageSize::Ten,
            surface: Arc::new(NoopSurface),
        })
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_mounts_and_unmounts_lists() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Char('u')));
        assert_eq!(app.route, Route::List(Resource::Users));
        assert!(app.panel.as_ref().is_some_and(|p| p.has_pending_work()));

        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.route, Route::Menu);
        assert!(app.panel.is_none());
    }

    #[test]
    fn test_help_popup_and_quit() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Char('?')));
        assert!(app.show_help_popup);
        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.show_help_popup);
        assert!(!app.should_quit);

        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    struct DraggingPanel {
        drags_ended: Rc<Cell<usize>>,
    }

    #[async_trait::async_trait(?Send)]
    impl Panel for DraggingPanel {
        fn resource(&self) -> Resource {
            Resource::Companies
        }
        fn draw(&mut self, _f: &mut Frame, _area: Rect) {}
        fn handle_key(&mut self, _key: KeyEvent) -> ScreenAction {
            ScreenAction::None
        }
        fn handle_mouse(&mut self, _event: MouseEvent) -> ScreenAction {
            ScreenAction::None
        }
        fn end_drag(&mut self) -> bool {
            self.drags_ended.set(self.drags_ended.get() + 1);
            true
        }
        fn has_pending_work(&self) -> bool {
            false
        }
        async fn process(&mut self) -> ScreenAction {
            ScreenAction::None
        }
        fn help(&self) -> &'static str {
            ""
        }
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_pointer_up_under_help_popup_ends_drag() {
        let drags_ended = Rc::new(Cell::new(0));
        let mut app = app();
        app.panel = Some(Box::new(DraggingPanel {
            drags_ended: Rc::clone(&drags_ended),
        }));
        app.handle_key_event(key(KeyCode::Char('?')));
        assert!(app.show_help_popup);

        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left)));
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left)));
        assert_eq!(drags_ended.get(), 0);
        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left)));
        assert_eq!(drags_ended.get(), 1);
        assert!(app.show_help_popup);
    }

    #[test]
    fn test_ctrl_c_quits_from_list() {
        let mut app = app();
        app.navigate(Route::List(Resource::Companies));
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_actions_update_messages() {
        let mut app = app();
        app.apply(ScreenAction::SetError("boom".to_string()));
        assert_eq!(app.error_message.as_deref(), Some("boom"));
        app.apply(ScreenAction::SetStatus("ok".to_string()));
        assert_eq!(app.error_message, None);
        assert_eq!(app.status_message.as_deref(), Some("ok"));
        app.apply(ScreenAction::Open(Resource::MasterData));
        assert_eq!(app.status_message, None);
        assert_eq!(app.panel.as_ref().map(|p| p.resource()), Some(Resource::MasterData));
    }
}
