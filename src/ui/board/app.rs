//! Interactive board: event loop, key handling, and session overlay state.
//!
//! The app owns the board controller and drives its async operations on a
//! current-thread runtime; optimistic mutations land before the first await,
//! so the board never renders a half-applied state.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Runtime;

use crate::controller::BoardController;
use crate::due;
use crate::error::Result;
use crate::prefs::{self, PrefStore, Theme};
use crate::remote::Remote;
use crate::task::Column;

use super::view;

const EVENT_POLL_MS: u64 = 120;

/// Which session field receives keystrokes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditorFocus {
    Name,
    Description,
    Due,
    Tags,
}

/// In-session tag creation input.
pub(crate) struct NewTagInput {
    pub(crate) name: String,
    pub(crate) color: String,
    pub(crate) color_active: bool,
}

impl NewTagInput {
    fn new() -> Self {
        Self {
            name: String::new(),
            color: "#6366F1".to_string(),
            color_active: false,
        }
    }
}

pub struct AppState<P: PrefStore> {
    pub(crate) controller: BoardController,
    pub(crate) theme: Theme,
    prefs: P,
    /// Index into `Column::ALL` for the focused column.
    pub(crate) selected_column: usize,
    pub(crate) selected_row: usize,
    /// Highlighted target column while a drag is in progress.
    pub(crate) drop_target: Option<usize>,
    pub(crate) focus: EditorFocus,
    pub(crate) tag_cursor: usize,
    /// Text buffer for the due date field, parsed on submit.
    pub(crate) due_input: String,
    pub(crate) new_tag: Option<NewTagInput>,
    pub(crate) status: Option<String>,
    runtime: Runtime,
}

impl<P: PrefStore> AppState<P> {
    fn new(runtime: Runtime, controller: BoardController, prefs: P, theme: Theme) -> Self {
        Self {
            controller,
            theme,
            prefs,
            selected_column: 0,
            selected_row: 0,
            drop_target: None,
            focus: EditorFocus::Name,
            tag_cursor: 0,
            due_input: String::new(),
            new_tag: None,
            status: None,
            runtime,
        }
    }

    pub(crate) fn selected_column_kind(&self) -> Column {
        Column::ALL[self.selected_column]
    }

    /// Id of the highlighted task, if the focused column has any.
    pub(crate) fn selected_task_id(&self) -> Option<i64> {
        let view = self.controller.view();
        view.column(self.selected_column_kind())
            .get(self.selected_row)
            .map(|task| task.id)
    }

    fn clamp_selection(&mut self) {
        let len = self
            .controller
            .view()
            .column(self.selected_column_kind())
            .len();
        if len == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= len {
            self.selected_row = len - 1;
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    fn refresh(&mut self) {
        self.runtime.block_on(self.controller.refresh());
        self.clamp_selection();
        self.set_status("Synced");
    }

    fn open_create(&mut self) {
        self.controller.open_create();
        self.focus = EditorFocus::Name;
        self.tag_cursor = 0;
        self.due_input.clear();
    }

    fn open_detail(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        self.controller.open_detail(task_id);
        self.focus = EditorFocus::Name;
        self.tag_cursor = 0;
        self.due_input = self
            .controller
            .session()
            .and_then(|session| session.due_date)
            .map(|due| due.to_rfc3339())
            .unwrap_or_default();
    }

    fn delete_selected(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        self.runtime.block_on(self.controller.delete_task(task_id));
        self.clamp_selection();
        self.set_status(format!("Deleted task #{}", task_id));
    }

    fn grab_selected(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        self.controller.begin_drag(task_id);
        self.drop_target = Some(self.selected_column);
    }

    fn drop_dragged(&mut self) {
        let Some(target) = self.drop_target.take() else {
            return;
        };
        let column = Column::ALL[target];
        match self.runtime.block_on(self.controller.drop_on(column)) {
            Ok(true) => {
                self.selected_column = target;
                self.clamp_selection();
                self.set_status(format!("Moved to {}", column.title()));
            }
            Ok(false) => {}
            Err(err) => self.set_status(err.to_string()),
        }
    }

    fn submit_session(&mut self) {
        // Parse the due field before handing the session to the store.
        let due_input = self.due_input.trim().to_string();
        if let Some(session) = self.controller.session_mut() {
            if due_input.is_empty() {
                session.due_date = None;
            } else {
                match due::parse_due(&due_input) {
                    Ok(due) => session.due_date = Some(due),
                    Err(err) => {
                        session.fail(err.to_string());
                        return;
                    }
                }
            }
        }

        if self.runtime.block_on(self.controller.submit_session()) {
            self.clamp_selection();
            self.set_status("Saved");
        }
    }

    fn create_tag(&mut self) {
        let Some(input) = self.new_tag.take() else {
            return;
        };
        let result = self
            .runtime
            .block_on(self.controller.create_tag_in_session(&input.name, &input.color));
        // Failures already land in the session banner.
        if let Ok(tag) = result {
            self.set_status(format!("Created tag {}", tag.name));
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = prefs::toggle_theme(&mut self.prefs, self.theme);
    }
}

/// Opens the board TUI against the given remote store, starting focused on
/// `start_column`.
pub fn run<P: PrefStore>(
    runtime: Runtime,
    remote: Arc<dyn Remote>,
    prefs: P,
    start_column: Column,
) -> Result<()> {
    let mut controller = BoardController::new(remote);
    runtime.block_on(controller.refresh());
    let theme = prefs::load_theme(&prefs);
    let mut app = AppState::new(runtime, controller, prefs, theme);
    app.selected_column = Column::ALL
        .iter()
        .position(|&column| column == start_column)
        .unwrap_or(0);
    run_terminal(&mut app)
}

fn run_terminal<P: PrefStore>(app: &mut AppState<P>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<P: PrefStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState<P>,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            // One wall-clock read per render pass; urgency tiers derive
            // from this single timestamp.
            let now = Utc::now();
            terminal.draw(|frame| view::render(frame, app, now))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        } else {
            // Redraw periodically so urgency tiers track the clock.
            dirty = true;
        }
    }
    Ok(())
}

/// Returns true when the app should exit.
fn handle_key<P: PrefStore>(app: &mut AppState<P>, key: KeyEvent) -> bool {
    if app.new_tag.is_some() {
        handle_new_tag_key(app, key);
        return false;
    }
    if app.controller.session().is_some() {
        handle_session_key(app, key);
        return false;
    }
    handle_board_key(app, key)
}

fn handle_board_key<P: PrefStore>(app: &mut AppState<P>, key: KeyEvent) -> bool {
    let dragging = app.controller.dragging().is_some();

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Esc if dragging => {
            app.controller.cancel_drag();
            app.drop_target = None;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            if dragging {
                if let Some(target) = app.drop_target.as_mut() {
                    *target = target.saturating_sub(1);
                }
            } else if app.selected_column > 0 {
                app.selected_column -= 1;
                app.selected_row = 0;
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if dragging {
                if let Some(target) = app.drop_target.as_mut() {
                    *target = (*target + 1).min(Column::ALL.len() - 1);
                }
            } else if app.selected_column + 1 < Column::ALL.len() {
                app.selected_column += 1;
                app.selected_row = 0;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected_row = app.selected_row.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.selected_row += 1;
            app.clamp_selection();
        }
        KeyCode::Enter if dragging => app.drop_dragged(),
        KeyCode::Char('g') | KeyCode::Char(' ') if !dragging => app.grab_selected(),
        KeyCode::Enter | KeyCode::Char('e') => app.open_detail(),
        KeyCode::Char('a') => app.open_create(),
        KeyCode::Char('d') => app.delete_selected(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
    false
}

fn handle_session_key<P: PrefStore>(app: &mut AppState<P>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.controller.cancel_session();
            return;
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                EditorFocus::Name => EditorFocus::Description,
                EditorFocus::Description => EditorFocus::Due,
                EditorFocus::Due => EditorFocus::Tags,
                EditorFocus::Tags => EditorFocus::Name,
            };
            return;
        }
        KeyCode::BackTab => {
            app.focus = match app.focus {
                EditorFocus::Name => EditorFocus::Tags,
                EditorFocus::Description => EditorFocus::Name,
                EditorFocus::Due => EditorFocus::Description,
                EditorFocus::Tags => EditorFocus::Due,
            };
            return;
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.submit_session();
            return;
        }
        _ => {}
    }

    if app.focus == EditorFocus::Tags {
        let tag_count = app.controller.tags().tags().len();
        match key.code {
            KeyCode::Up => app.tag_cursor = app.tag_cursor.saturating_sub(1),
            KeyCode::Down if tag_count > 0 => {
                app.tag_cursor = (app.tag_cursor + 1).min(tag_count - 1);
            }
            KeyCode::Char(' ') => {
                let tag_id = app
                    .controller
                    .tags()
                    .tags()
                    .get(app.tag_cursor)
                    .map(|tag| tag.id);
                if let (Some(tag_id), Some(session)) = (tag_id, app.controller.session_mut()) {
                    session.toggle_tag(tag_id);
                    session.clear_error();
                }
            }
            KeyCode::Char('n') => app.new_tag = Some(NewTagInput::new()),
            KeyCode::Enter => app.submit_session(),
            _ => {}
        }
        return;
    }

    // Text fields: name, description, due.
    match key.code {
        KeyCode::Enter => app.submit_session(),
        KeyCode::Backspace => {
            match app.focus {
                EditorFocus::Name => {
                    if let Some(session) = app.controller.session_mut() {
                        session.name.pop();
                        session.clear_error();
                    }
                }
                EditorFocus::Description => {
                    if let Some(session) = app.controller.session_mut() {
                        session.description.pop();
                        session.clear_error();
                    }
                }
                EditorFocus::Due => {
                    app.due_input.pop();
                    if let Some(session) = app.controller.session_mut() {
                        session.clear_error();
                    }
                }
                EditorFocus::Tags => {}
            }
        }
        KeyCode::Char(ch) => {
            match app.focus {
                EditorFocus::Name => {
                    if let Some(session) = app.controller.session_mut() {
                        session.name.push(ch);
                        session.clear_error();
                    }
                }
                EditorFocus::Description => {
                    if let Some(session) = app.controller.session_mut() {
                        session.description.push(ch);
                        session.clear_error();
                    }
                }
                EditorFocus::Due => {
                    app.due_input.push(ch);
                    if let Some(session) = app.controller.session_mut() {
                        session.clear_error();
                    }
                }
                EditorFocus::Tags => {}
            }
        }
        _ => {}
    }
}

fn handle_new_tag_key<P: PrefStore>(app: &mut AppState<P>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.new_tag = None;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(input) = app.new_tag.as_mut() {
                input.color_active = !input.color_active;
            }
        }
        KeyCode::Enter => app.create_tag(),
        KeyCode::Backspace => {
            if let Some(input) = app.new_tag.as_mut() {
                if input.color_active {
                    input.color.pop();
                } else {
                    input.name.pop();
                }
            }
        }
        KeyCode::Char(ch) => {
            if let Some(input) = app.new_tag.as_mut() {
                if input.color_active {
                    input.color.push(ch);
                } else {
                    input.name.push(ch);
                }
            }
        }
        _ => {}
    }
}
