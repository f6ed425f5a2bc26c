//! Interactive full-screen browsing of a local-mode table controller.
//!
//! Runs in the alternate screen with raw mode enabled and drives every state
//! change (paging, sort toggles, the global filter, resets) through the
//! controller, re-rendering after each key. Falls back to a single plain
//! print when stdout is not a TTY.

use crate::display::table::TableRenderer;
use crate::error::{AppError, DisplayError};
use crate::table::TableController;
use crate::utils::text::truncate_text_unicode;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Keyboard input actions
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    CursorUp,
    CursorDown,
    Activate,
    /// Toggle sort on the Nth visible column (0-based).
    SortColumn(usize),
    EnterFilter,
    FilterChar(char),
    FilterBackspace,
    FilterApply,
    FilterCancel,
    ResetAll,
    Help,
    Quit,
    ForceQuit,
    Invalid,
}

/// Maps a key event to an action. Split out of the read loop so the key map
/// is testable without a terminal.
pub(crate) fn map_key(key: KeyEvent, filter_mode: bool) -> InputAction {
    let KeyEvent {
        code, modifiers, ..
    } = key;

    if filter_mode {
        return match code {
            KeyCode::Enter => InputAction::FilterApply,
            KeyCode::Esc => InputAction::FilterCancel,
            KeyCode::Backspace => InputAction::FilterBackspace,
            KeyCode::Char('c') if modifiers == KeyModifiers::CONTROL => InputAction::ForceQuit,
            KeyCode::Char(c) => InputAction::FilterChar(c),
            _ => InputAction::Invalid,
        };
    }

    match (code, modifiers) {
        // Exit
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => InputAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::ForceQuit,

        // Page navigation
        (KeyCode::Char(']'), _) | (KeyCode::Right, _) | (KeyCode::Char('l'), _) => {
            InputAction::NextPage
        }
        (KeyCode::Char('['), _) | (KeyCode::Left, _) | (KeyCode::Char('h'), _) => {
            InputAction::PreviousPage
        }
        (KeyCode::Home, _) | (KeyCode::Char('g'), _) => InputAction::FirstPage,
        (KeyCode::End, _) | (KeyCode::Char('G'), _) => InputAction::LastPage,

        // Row cursor
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => InputAction::CursorUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => InputAction::CursorDown,
        (KeyCode::Enter, _) => InputAction::Activate,

        // Table state
        (KeyCode::Char('/'), _) => InputAction::EnterFilter,
        (KeyCode::Char('r'), _) => InputAction::ResetAll,
        (KeyCode::Char(c), _) if c.is_ascii_digit() && c != '0' => {
            InputAction::SortColumn(c as usize - '1' as usize)
        }

        (KeyCode::Char('?'), _) => InputAction::Help,

        _ => InputAction::Invalid,
    }
}

fn terminal_error(context: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Display(DisplayError::TerminalOutput(format!("{}: {}", context, e)))
}

/// Interactive pager over a table controller.
pub struct InteractivePager {
    terminal_height: u16,
    terminal_width: u16,
    cursor: usize,
    /// `Some` while the global-filter input line is active.
    filter_input: Option<String>,
    status_message: Option<String>,
}

impl InteractivePager {
    pub fn new() -> Result<Self, AppError> {
        // Safe fallback with default values
        let (width, height) = terminal::size().unwrap_or((80, 24));

        Ok(Self {
            terminal_height: height.clamp(10, 100),
            terminal_width: width.clamp(40, 200),
            cursor: 0,
            filter_input: None,
            status_message: None,
        })
    }

    /// Browses the controller until the user quits. `on_activate` fires when
    /// a row is activated (Enter) and may return a status message to show.
    pub fn run<R>(
        &mut self,
        controller: &mut TableController<R>,
        renderer: &TableRenderer,
        on_activate: &mut dyn FnMut(&R) -> Option<String>,
    ) -> Result<(), AppError> {
        // Plain output for pipes and redirects
        if !atty::is(atty::Stream::Stdout) {
            println!("{}", renderer.render(controller));
            println!("{}", renderer.render_page_info(controller));
            return Ok(());
        }

        execute!(io::stdout(), EnterAlternateScreen)
            .map_err(|e| terminal_error("Failed to enter alternate screen", e))?;
        terminal::enable_raw_mode()
            .map_err(|e| terminal_error("Failed to enable raw mode", e))?;

        let result = self.event_loop(controller, renderer, on_activate);

        terminal::disable_raw_mode()
            .map_err(|e| terminal_error("Failed to disable raw mode", e))?;
        execute!(io::stdout(), LeaveAlternateScreen)
            .map_err(|e| terminal_error("Failed to leave alternate screen", e))?;

        result
    }

    fn event_loop<R>(
        &mut self,
        controller: &mut TableController<R>,
        renderer: &TableRenderer,
        on_activate: &mut dyn FnMut(&R) -> Option<String>,
    ) -> Result<(), AppError> {
        loop {
            self.draw(controller, renderer)?;

            let key = match event::read()
                .map_err(|e| terminal_error("Failed to read key event", e))?
            {
                Event::Key(key) => key,
                _ => continue,
            };

            match map_key(key, self.filter_input.is_some()) {
                InputAction::Quit | InputAction::ForceQuit => break,
                InputAction::NextPage => {
                    controller.next_page();
                    self.cursor = 0;
                }
                InputAction::PreviousPage => {
                    controller.previous_page();
                    self.cursor = 0;
                }
                InputAction::FirstPage => {
                    controller.first_page();
                    self.cursor = 0;
                }
                InputAction::LastPage => {
                    controller.last_page();
                    self.cursor = 0;
                }
                InputAction::CursorUp => {
                    self.cursor = self.cursor.saturating_sub(1);
                }
                InputAction::CursorDown => {
                    let row_count = controller.page_rows().len();
                    if self.cursor + 1 < row_count {
                        self.cursor += 1;
                    }
                }
                InputAction::Activate => {
                    let rows = controller.page_rows();
                    if let Some(row) = rows.get(self.cursor).copied() {
                        self.status_message = on_activate(row);
                    }
                }
                InputAction::SortColumn(index) => {
                    let column_id = controller
                        .visible_columns()
                        .get(index)
                        .map(|column| column.id().to_string());
                    if let Some(column_id) = column_id {
                        controller.toggle_sort(&column_id);
                        self.cursor = 0;
                    }
                }
                InputAction::EnterFilter => {
                    self.filter_input = Some(controller.global_filter().to_string());
                }
                InputAction::FilterChar(c) => {
                    if let Some(input) = self.filter_input.as_mut() {
                        input.push(c);
                    }
                }
                InputAction::FilterBackspace => {
                    if let Some(input) = self.filter_input.as_mut() {
                        input.pop();
                    }
                }
                InputAction::FilterApply => {
                    if let Some(input) = self.filter_input.take() {
                        controller.set_global_filter(input);
                        self.cursor = 0;
                    }
                }
                InputAction::FilterCancel => {
                    self.filter_input = None;
                }
                InputAction::ResetAll => {
                    controller.reset_all();
                    self.cursor = 0;
                    self.status_message = None;
                }
                InputAction::Help => {
                    self.show_help()?;
                }
                InputAction::Invalid => {
                    // Ignore unmapped keys
                }
            }

            // The cursor must always point at a row that exists.
            let row_count = controller.page_rows().len();
            if row_count == 0 {
                self.cursor = 0;
            } else if self.cursor >= row_count {
                self.cursor = row_count - 1;
            }
        }
        Ok(())
    }

    fn draw<R>(
        &self,
        controller: &TableController<R>,
        renderer: &TableRenderer,
    ) -> Result<(), AppError> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
            .map_err(|e| terminal_error("Failed to clear screen", e))?;

        let table = renderer.render_with_selection(controller, Some(self.cursor));
        let available_lines = (self.terminal_height as usize).saturating_sub(3);
        for line in table.lines().take(available_lines) {
            println!("{}\r", truncate_text_unicode(line, self.terminal_width as usize));
        }

        self.draw_status(controller, renderer)?;

        io::stdout()
            .flush()
            .map_err(|e| terminal_error("Failed to flush stdout", e))?;
        Ok(())
    }

    fn draw_status<R>(
        &self,
        controller: &TableController<R>,
        renderer: &TableRenderer,
    ) -> Result<(), AppError> {
        let status_row = self.terminal_height.saturating_sub(2);
        execute!(io::stdout(), cursor::MoveTo(0, status_row))
            .map_err(|e| terminal_error("Failed to move cursor", e))?;

        let separator = "─".repeat(self.terminal_width as usize);
        println!("{}\r", separator);

        let status = if let Some(input) = &self.filter_input {
            format!("Filter: {}█ (Enter to apply, Esc to cancel)", input)
        } else if let Some(message) = &self.status_message {
            format!("{} | q Quit | ? Help", message)
        } else {
            format!(
                "{} | []/← Page | ↑↓ Row | 1-9 Sort | / Filter | r Reset | ? Help | q Quit",
                renderer.render_page_info(controller)
            )
        };

        println!("{}\r", truncate_text_unicode(&status, self.terminal_width as usize));
        Ok(())
    }

    fn show_help(&self) -> Result<(), AppError> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
            .map_err(|e| terminal_error("Failed to clear screen for help", e))?;

        println!("📖 Interactive Table Operation Guide\r");
        println!("═══════════════════════════════════════════════\r");
        println!("\r");
        println!("📄 Page Navigation:\r");
        println!("  ]  →  l     Next page\r");
        println!("  [  ←  h     Previous page\r");
        println!("  g  Home     First page\r");
        println!("  G  End      Last page\r");
        println!("\r");
        println!("📜 Rows:\r");
        println!("  ↑  k        Move cursor up\r");
        println!("  ↓  j        Move cursor down\r");
        println!("  Enter       Activate current row\r");
        println!("\r");
        println!("🔧 Table state:\r");
        println!("  1-9         Toggle sort on column N (asc → desc → off)\r");
        println!("  /           Edit the global filter\r");
        println!("  r           Reset filters, sorting, and pagination\r");
        println!("\r");
        println!("  ?           Show this help\r");
        println!("  q  Esc      Exit\r");
        println!("  Ctrl+C      Force exit\r");
        println!("\r");
        println!("Press any key to return...\r");

        io::stdout()
            .flush()
            .map_err(|e| terminal_error("Failed to flush stdout for help", e))?;

        event::read().map_err(|e| terminal_error("Failed to read key event", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_key_navigation() {
        assert_eq!(map_key(key(KeyCode::Char(']')), false), InputAction::NextPage);
        assert_eq!(map_key(key(KeyCode::Right), false), InputAction::NextPage);
        assert_eq!(
            map_key(key(KeyCode::Char('[')), false),
            InputAction::PreviousPage
        );
        assert_eq!(map_key(key(KeyCode::Char('g')), false), InputAction::FirstPage);
        assert_eq!(map_key(key(KeyCode::Char('G')), false), InputAction::LastPage);
        assert_eq!(map_key(key(KeyCode::Char('k')), false), InputAction::CursorUp);
        assert_eq!(map_key(key(KeyCode::Down), false), InputAction::CursorDown);
    }

    #[test]
    fn test_map_key_table_state() {
        assert_eq!(
            map_key(key(KeyCode::Char('1')), false),
            InputAction::SortColumn(0)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('9')), false),
            InputAction::SortColumn(8)
        );
        // '0' is not a column shortcut.
        assert_eq!(map_key(key(KeyCode::Char('0')), false), InputAction::Invalid);
        assert_eq!(map_key(key(KeyCode::Char('/')), false), InputAction::EnterFilter);
        assert_eq!(map_key(key(KeyCode::Char('r')), false), InputAction::ResetAll);
        assert_eq!(map_key(key(KeyCode::Enter), false), InputAction::Activate);
    }

    #[test]
    fn test_map_key_quit() {
        assert_eq!(map_key(key(KeyCode::Char('q')), false), InputAction::Quit);
        assert_eq!(map_key(key(KeyCode::Esc), false), InputAction::Quit);
        assert_eq!(
            map_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                false
            ),
            InputAction::ForceQuit
        );
    }

    #[test]
    fn test_map_key_filter_mode_captures_text() {
        assert_eq!(
            map_key(key(KeyCode::Char('q')), true),
            InputAction::FilterChar('q')
        );
        assert_eq!(
            map_key(key(KeyCode::Backspace), true),
            InputAction::FilterBackspace
        );
        assert_eq!(map_key(key(KeyCode::Enter), true), InputAction::FilterApply);
        assert_eq!(map_key(key(KeyCode::Esc), true), InputAction::FilterCancel);
        // Ctrl+C still force-quits from filter mode.
        assert_eq!(
            map_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                true
            ),
            InputAction::ForceQuit
        );
    }
}
