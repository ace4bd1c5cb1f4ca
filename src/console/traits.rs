//! Core traits for the console screens

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::models::Resource;

/// Actions that can be returned from screen event handling
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// Open the list of a resource
    Open(Resource),
    /// Go back to the menu
    NavigateBack,
    /// Quit the application
    Quit,
    /// Set status message
    SetStatus(String),
    /// Set error message
    SetError(String),
    /// Clear messages
    ClearMessages,
    /// No action taken
    None,
}

/// A mounted resource list.
///
/// Dropping the panel unmounts it: its table state, widths and any drag in
/// progress go with it.
#[async_trait::async_trait(?Send)]
pub trait Panel {
    fn resource(&self) -> Resource;

    /// Draw the panel content
    fn draw(&mut self, f: &mut Frame, area: Rect);

    /// Handle keyboard input and return an action
    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction;

    /// Handle mouse input and return an action
    fn handle_mouse(&mut self, event: MouseEvent) -> ScreenAction;

    /// Pointer-up that the panel is not otherwise handling; ends any column
    /// drag. Returns whether a drag was active.
    fn end_drag(&mut self) -> bool;

    /// Whether API work is queued
    fn has_pending_work(&self) -> bool;

    /// Carry out queued API work
    async fn process(&mut self) -> ScreenAction;

    /// Whether typed characters go to a text input rather than shortcuts
    fn is_capturing_text(&self) -> bool {
        false
    }

    /// Shortcut summary for the help popup
    fn help(&self) -> &'static str;
}

/// Trait for screens with navigable lists
pub trait Navigable {
    /// Move selection up
    fn navigate_up(&mut self);

    /// Move selection down
    fn navigate_down(&mut self);

    /// Get currently selected index
    fn get_selected_index(&self) -> Option<usize>;

    /// Set selected index
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Get total number of items
    fn get_item_count(&self) -> usize;

    /// Navigate to first item
    fn navigate_to_first(&mut self) {
        if self.get_item_count() > 0 {
            self.set_selected_index(Some(0));
        }
    }

    /// Navigate to last item
    fn navigate_to_last(&mut self) {
        let count = self.get_item_count();
        if count > 0 {
            self.set_selected_index(Some(count - 1));
        }
    }
}
