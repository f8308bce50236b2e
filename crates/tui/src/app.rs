//! Main application struct and run loop.
//!
//! This module provides the `App` struct which orchestrates the TUI
//! application lifecycle: it maps pointer cells to grid pixels, drives the
//! gesture controller, commits finished gestures, and renders the frame.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use sitegrid_config::GridConfig;
use sitegrid_engine::{GestureController, GestureOutcome, GridGeometry, Persistence, mutator};
use sitegrid_protocol::{
    DEFAULT_TASK_HEIGHT, DEFAULT_TASK_TEXT, DEFAULT_TASK_TOP, Message, PointerPhase,
    ScheduleBoard, TradeColor,
};
use tracing::{debug, instrument, warn};

use crate::{
    AppState,
    event::{event_to_message, poll_event},
    layout::{GridLayout, MIN_HEIGHT, MIN_HEIGHT_WITH_HEADER, MIN_WIDTH, split_screen},
    state::{Prompt, PromptKind, TaskEntry},
    storage::ScheduleSink,
    terminal::AppTerminal,
    widgets::{
        ScheduleView, render_help_overlay, render_prompt, render_schedule, render_status_bar,
    },
};

/// The main application struct.
///
/// Owns the board state, the gesture controller, and the sink every
/// committed change is sent to.
#[derive(Debug)]
pub struct App<S> {
    state: AppState,
    controller: GestureController,
    sink: S,
    should_quit: bool,
    /// Last known terminal area, used to map pointer cells.
    last_area: Rect,
    /// Whether the header was shown in the last render.
    header_visible: bool,
}

impl<S: ScheduleSink> App<S> {
    /// Creates a new application over `board` on the grid described by `grid`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitegrid_config::GridConfig;
    /// use sitegrid_protocol::{ScheduleBoard, Task, ZoneId};
    /// use sitegrid_tui::{App, ScheduleSink};
    ///
    /// struct Discard;
    /// impl sitegrid_engine::Persistence for Discard {
    ///     fn save(&mut self, _: &ZoneId, _: &[Task]) {}
    /// }
    /// impl ScheduleSink for Discard {
    ///     fn save_lanes(&mut self, _: &ZoneId, _: &[String]) {}
    /// }
    ///
    /// let app = App::new(ScheduleBoard::default(), &GridConfig::default(), Discard);
    /// assert!(!app.should_quit());
    /// ```
    #[must_use]
    pub fn new(board: ScheduleBoard, grid: &GridConfig, sink: S) -> Self {
        Self {
            state: AppState::new(board),
            controller: GestureController::new(GridGeometry::from(grid)),
            sink,
            should_quit: false,
            last_area: Rect::default(),
            header_visible: true,
        }
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns the gesture controller.
    #[must_use]
    pub fn controller(&self) -> &GestureController {
        &self.controller
    }

    /// Returns `true` once the user has asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Consumes the app and returns its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn geometry(&self) -> GridGeometry {
        *self.controller.geometry()
    }

    /// Lays out the grid the way the last frame did.
    fn grid_layout(&self) -> GridLayout {
        let screen = split_screen(self.last_area, self.header_visible);
        GridLayout::new(
            screen.grid,
            self.state.zone().lane_count(),
            self.geometry().unit,
            self.state.scroll,
        )
    }

    /// Largest scroll that still fills the body with grid rows.
    fn max_scroll(&self, layout: &GridLayout) -> u16 {
        let geometry = self.geometry();
        let rows = geometry.span_px() / geometry.unit.max(1);
        let rows = u16::try_from(rows).unwrap_or(u16::MAX);
        rows.saturating_sub(layout.body().height)
    }

    /// Updates the application state based on a message.
    pub fn update(&mut self, msg: Message) {
        if msg.is_terminating() {
            self.should_quit = true;
            return;
        }

        if let Message::Pointer { phase, column, row } = msg {
            self.handle_pointer(phase, column, row);
            return;
        }

        // Help intercepts every other key; the toggle key closes it too.
        if self.state.dismiss_help() {
            return;
        }

        if msg.is_structural() && self.controller.is_active() {
            debug!(?msg, "ignored while a gesture is in flight");
            return;
        }

        match msg {
            Message::ToggleHelp => self.state.toggle_help(),
            Message::Escape => self.handle_escape(),
            Message::NextZone => self.state.next_zone(),
            Message::SelectLaneLeft => self.state.select_lane_left(),
            Message::SelectLaneRight => self.state.select_lane_right(),
            Message::ScrollUp | Message::ScrollDown => {
                let delta = if msg == Message::ScrollUp { -1 } else { 1 };
                let max = self.max_scroll(&self.grid_layout());
                self.state.scroll_by(delta, max);
            }
            Message::AddTask => self.add_task(),
            Message::AddLane => self.state.prompt.open(Prompt::new_lane()),
            Message::CycleColor => self.cycle_color(),
            Message::DeleteTask => self.delete_task(),
            Message::PromptInput { ch } => {
                if let Some(prompt) = self.state.prompt.current_mut() {
                    prompt.push(ch);
                }
            }
            Message::PromptBackspace => {
                if let Some(prompt) = self.state.prompt.current_mut() {
                    prompt.backspace();
                }
            }
            Message::PromptConfirm => self.confirm_prompt(),
            Message::PromptCancel => {
                self.state.prompt.take();
            }
            Message::Quit | Message::Pointer { .. } => {}
        }
    }

    /// Feeds one pointer event to the gesture controller.
    #[instrument(level = "trace", skip(self))]
    fn handle_pointer(&mut self, phase: PointerPhase, column: u16, row: u16) {
        let layout = self.grid_layout();
        let point = layout.to_point(column, row);

        if phase != PointerPhase::Down
            && self
                .controller
                .discard_if_stale(self.state.board.current_zone(), &mut self.state.overlay)
        {
            self.state.overlay.settle();
        }

        match phase {
            PointerPhase::Down => {
                if self.state.prompt.is_open() || self.state.help_visible {
                    return;
                }
                let hit = layout.hit_test(self.state.zone(), column, row);
                match hit.task() {
                    Some(id) => {
                        self.state.select_task(id);
                        self.state.overlay.clear_moved();
                    }
                    None => {
                        if let Some(lane) = layout.lane_at_column(column) {
                            self.state.selected_lane = lane;
                        }
                    }
                }
                self.controller
                    .pointer_down(hit, point, self.state.board.current_zone());
            }
            PointerPhase::Move => {
                self.controller
                    .pointer_move(point, &layout, &mut self.state.overlay);
            }
            PointerPhase::Up => self.finish_gesture(),
        }
    }

    /// Ends the gesture and commits its outcome.
    fn finish_gesture(&mut self) {
        let outcome = self.controller.pointer_up(&mut self.state.overlay);
        let zone = self.state.board.current_zone_mut();
        let changed = mutator::apply(
            outcome,
            zone,
            &mut self.state.overlay,
            &mut self.state.prompt,
            &mut self.sink,
        );
        self.state.overlay.settle();

        let task = match outcome {
            GestureOutcome::Moved { task, .. } | GestureOutcome::Resized { task, .. } => task,
            GestureOutcome::None | GestureOutcome::Click { .. } => return,
        };
        if let Some((top, height)) = self
            .state
            .zone()
            .get_task(task)
            .filter(|_| changed)
            .map(|t| (t.top, t.height))
        {
            let span = self.geometry().format_span(top, height);
            self.state.notify(format!("Task time adjusted: {span}"));
        }
    }

    fn handle_escape(&mut self) {
        if self.controller.cancel(&mut self.state.overlay) {
            self.state.overlay.settle();
            self.state.notify("Drag cancelled");
        } else {
            self.state.selected_task = None;
        }
    }

    /// Opens the new task prompt, pre-filled with the default label and slot.
    fn add_task(&mut self) {
        let geometry = self.geometry();
        let entry = format!(
            "{DEFAULT_TASK_TEXT} {}-{}",
            geometry.time_at(DEFAULT_TASK_TOP),
            geometry.time_at(DEFAULT_TASK_TOP + DEFAULT_TASK_HEIGHT)
        );
        self.state
            .prompt
            .open(Prompt::new_task(self.state.selected_lane, entry));
    }

    fn insert_task(&mut self, lane: usize, input: &str) {
        let entry = match TaskEntry::parse(input) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(%err, input, "rejected task entry");
                self.state.notify(err.to_string());
                return;
            }
        };
        let task = self
            .geometry()
            .task_between(lane, entry.label, entry.start, entry.end)
            .with_color(TradeColor::Carpenter);
        let zone = self.state.board.current_zone_mut();
        match zone.add_task(task) {
            Ok(id) => {
                self.sink.save(&zone.id, &zone.tasks);
                self.state.select_task(id);
                self.state.notify("Task added");
            }
            Err(err) => {
                warn!(%err, lane, "could not add task");
                self.state.notify(err.to_string());
            }
        }
    }

    fn cycle_color(&mut self) {
        let Some(id) = self.state.selected_task else {
            return;
        };
        let zone = self.state.board.current_zone_mut();
        let Some(next) = zone
            .get_task(id)
            .map(|t| t.color.map_or(TradeColor::Carpenter, TradeColor::next))
        else {
            return;
        };
        zone.set_color(id, next);
        self.sink.save(&zone.id, &zone.tasks);
        self.state.notify(format!("Color: {}", next.display_name()));
    }

    fn delete_task(&mut self) {
        let Some(id) = self.state.selected_task.take() else {
            return;
        };
        let zone = self.state.board.current_zone_mut();
        if let Some(task) = zone.remove_task(id) {
            self.sink.save(&zone.id, &zone.tasks);
            self.state.notify(format!("Task deleted: {}", task.text));
        }
    }

    fn confirm_prompt(&mut self) {
        let Some(prompt) = self.state.prompt.take() else {
            return;
        };
        match prompt.kind {
            PromptKind::NewTask { lane } => self.insert_task(lane, &prompt.input),
            PromptKind::EditLabel(id) => {
                let zone = self.state.board.current_zone_mut();
                if mutator::apply_label(zone, id, &prompt.input, &mut self.sink) {
                    self.state.select_task(id);
                    self.state.notify("Task renamed");
                }
            }
            PromptKind::NewLane => {
                let zone = self.state.board.current_zone_mut();
                match zone.add_lane(&prompt.input) {
                    Ok(index) => {
                        self.sink.save_lanes(&zone.id, &zone.lanes);
                        let name = zone.lanes[index].clone();
                        self.state.selected_lane = index;
                        self.state.notify(format!("Lane added: {name}"));
                    }
                    Err(err) => self.state.notify(err.to_string()),
                }
            }
        }
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - If terminal is below minimum dimensions, shows a "terminal too small" message.
    /// - If terminal is tight (below `MIN_HEIGHT_WITH_HEADER`), hides the header.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.header_visible = false;
            Self::render_terminal_too_small(frame, area);
            return;
        }

        self.header_visible = area.height >= MIN_HEIGHT_WITH_HEADER;
        let screen = split_screen(area, self.header_visible);
        if let Some(header) = screen.header {
            self.render_header(frame, header);
        }

        // The body may have grown since the last scroll.
        let max = self.max_scroll(&self.grid_layout());
        self.state.scroll = self.state.scroll.min(max);

        let layout = self.grid_layout();
        let zone = self.state.zone();
        let view = ScheduleView::new(zone, &layout, self.geometry(), &self.state.overlay)
            .selected(self.state.selected_lane, self.state.selected_task);
        let buf = frame.buffer_mut();
        render_schedule(&view, buf);
        render_status_bar(
            &zone.id,
            self.state.status.as_deref(),
            self.controller.is_active(),
            screen.status,
            buf,
        );

        if self.state.help_visible {
            render_help_overlay(area, buf);
        }
        if let Some(prompt) = self.state.prompt.current() {
            render_prompt(prompt, area, buf);
        }
    }

    /// Renders a message indicating the terminal is too small.
    fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
        let message = format!(
            "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });

        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + vertical_offset,
            width: area.width,
            height: area.height.saturating_sub(vertical_offset),
        };

        frame.render_widget(paragraph, centered_area);
    }

    /// Renders the header bar with title, current zone and help cue.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, help_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(17)]).areas(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "sitegrid",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled(
                format!("Zone {}", self.state.zone().id),
                Style::default().fg(Color::White),
            ),
        ]));
        frame.render_widget(title, title_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }

    /// Runs the main application loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sitegrid_config::GridConfig;
    /// use sitegrid_protocol::ScheduleBoard;
    /// use sitegrid_store::{BackgroundSaver, ScheduleStore};
    /// use sitegrid_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let (saver, writer) = BackgroundSaver::spawn(ScheduleStore::new("/tmp/sitegrid")?);
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(ScheduleBoard::default(), &GridConfig::default(), saver);
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     drop(app);
    ///     writer.await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()? {
                let prompt_open = self.state.prompt.is_open();
                if let Some(msg) = event_to_message(&event, prompt_open) {
                    self.update(msg);
                }
            }

            if self.should_quit {
                break;
            }

            // Give the background saver a turn on single-threaded runtimes
            tokio::task::yield_now().await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingSink, buffer_to_string};
    use ratatui::{Terminal, backend::TestBackend};
    use sitegrid_protocol::{Task, TaskId, ZoneId};

    // 86x30 with header: grid from row 3, lane names on row 3, body from
    // row 4 and column 6, four 20-column lanes. Grid row r is screen row 4 + r.
    const WIDTH: u16 = 86;
    const HEIGHT: u16 = 30;

    fn app_with_task() -> (App<RecordingSink>, TaskId) {
        let mut board = ScheduleBoard::default();
        // 10:00 ~ 11:00 in lane 0: screen rows 12..=15
        let id = board
            .current_zone_mut()
            .add_task(Task::new(0, 320, 160, "Forms"))
            .expect("add");
        let mut app = App::new(board, &GridConfig::default(), RecordingSink::default());
        draw(&mut app, WIDTH, HEIGHT);
        (app, id)
    }

    fn draw(app: &mut App<RecordingSink>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|frame| app.view(frame)).expect("draw");
        buffer_to_string(terminal.backend().buffer())
    }

    fn pointer(app: &mut App<RecordingSink>, phase: PointerPhase, column: u16, row: u16) {
        app.update(Message::Pointer { phase, column, row });
    }

    fn task(app: &App<RecordingSink>, id: TaskId) -> &Task {
        app.state().zone().get_task(id).expect("task")
    }

    fn type_text(app: &mut App<RecordingSink>, text: &str) {
        for ch in text.chars() {
            app.update(Message::PromptInput { ch });
        }
    }

    fn clear_prompt(app: &mut App<RecordingSink>) {
        let len = app
            .state()
            .prompt
            .current()
            .map_or(0, |p| p.input.chars().count());
        for _ in 0..len {
            app.update(Message::PromptBackspace);
        }
    }

    #[test]
    fn quit_message_sets_should_quit() {
        let (mut app, _) = app_with_task();
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn help_dismisses_on_any_key() {
        let (mut app, _) = app_with_task();
        app.update(Message::ToggleHelp);
        assert!(app.state().help_visible);

        app.update(Message::AddTask);
        assert!(!app.state().help_visible);
        assert!(!app.state().prompt.is_open());
        assert_eq!(app.state().zone().tasks.len(), 1);
    }

    #[test]
    fn quit_works_with_help_visible() {
        let (mut app, _) = app_with_task();
        app.update(Message::ToggleHelp);
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn drag_moves_bar_across_lanes() {
        let (mut app, id) = app_with_task();

        pointer(&mut app, PointerPhase::Down, 10, 13);
        pointer(&mut app, PointerPhase::Move, 30, 15);
        assert_eq!(app.state().overlay.position(id), Some((400, 160)));
        assert_eq!(app.state().overlay.highlighted(), Some(1));
        pointer(&mut app, PointerPhase::Up, 30, 15);

        let moved = task(&app, id);
        assert_eq!((moved.top, moved.height, moved.lane_index), (400, 160, 1));
        assert_eq!(app.state().overlay.position(id), None);
        assert_eq!(app.state().overlay.highlighted(), None);
        assert_eq!(app.state().overlay.moved(), Some(id));
        assert_eq!(
            app.state().status.as_deref(),
            Some("Task time adjusted: 10:30 ~ 11:30")
        );
        assert_eq!(app.sink.tasks.len(), 1);
    }

    #[test]
    fn drag_bottom_handle_resizes() {
        let (mut app, id) = app_with_task();

        pointer(&mut app, PointerPhase::Down, 10, 15);
        pointer(&mut app, PointerPhase::Move, 10, 17);
        pointer(&mut app, PointerPhase::Up, 10, 17);

        let resized = task(&app, id);
        assert_eq!((resized.top, resized.height), (320, 240));
        assert_eq!(
            app.state().status.as_deref(),
            Some("Task time adjusted: 10:00 ~ 11:30")
        );
    }

    #[test]
    fn drag_top_handle_past_bottom_keeps_last_valid_size() {
        let (mut app, id) = app_with_task();

        pointer(&mut app, PointerPhase::Down, 10, 12);
        pointer(&mut app, PointerPhase::Move, 10, 14);
        pointer(&mut app, PointerPhase::Move, 10, 20);
        pointer(&mut app, PointerPhase::Up, 10, 20);

        let resized = task(&app, id);
        assert_eq!((resized.top, resized.height), (400, 80));
    }

    #[test]
    fn click_opens_label_editor() {
        let (mut app, id) = app_with_task();

        pointer(&mut app, PointerPhase::Down, 10, 13);
        pointer(&mut app, PointerPhase::Up, 10, 13);

        let prompt = app.state().prompt.current().expect("prompt");
        assert_eq!(prompt.kind, PromptKind::EditLabel(id));
        assert_eq!(prompt.input, "Forms");
        assert!(app.sink.tasks.is_empty());

        for _ in 0..5 {
            app.update(Message::PromptBackspace);
        }
        type_text(&mut app, "Strip forms");
        app.update(Message::PromptConfirm);

        assert_eq!(task(&app, id).text, "Strip forms");
        assert!(!app.state().prompt.is_open());
        assert_eq!(app.sink.tasks.len(), 1);
    }

    #[test]
    fn cancelled_label_edit_changes_nothing() {
        let (mut app, id) = app_with_task();

        pointer(&mut app, PointerPhase::Down, 10, 13);
        pointer(&mut app, PointerPhase::Up, 10, 13);
        type_text(&mut app, "!!");
        app.update(Message::PromptCancel);

        assert_eq!(task(&app, id).text, "Forms");
        assert!(app.sink.tasks.is_empty());
    }

    #[test]
    fn presses_ignored_while_prompt_open() {
        let (mut app, _) = app_with_task();
        app.update(Message::AddLane);

        pointer(&mut app, PointerPhase::Down, 10, 13);
        assert!(!app.controller().is_active());
    }

    #[test]
    fn structural_commands_ignored_during_gesture() {
        let (mut app, id) = app_with_task();

        pointer(&mut app, PointerPhase::Down, 10, 13);
        app.update(Message::AddTask);
        app.update(Message::DeleteTask);
        app.update(Message::NextZone);

        assert_eq!(app.state().zone().id, ZoneId::new("A"));
        assert_eq!(app.state().zone().tasks.len(), 1);
        assert_eq!(app.state().selected_task, Some(id));
        assert!(!app.state().prompt.is_open());
        assert!(app.controller().is_active());
    }

    #[test]
    fn escape_cancels_drag() {
        let (mut app, id) = app_with_task();

        pointer(&mut app, PointerPhase::Down, 10, 13);
        pointer(&mut app, PointerPhase::Move, 10, 18);
        app.update(Message::Escape);
        pointer(&mut app, PointerPhase::Up, 10, 18);

        assert_eq!(task(&app, id).top, 320);
        assert_eq!(app.state().overlay.position(id), None);
        assert_eq!(app.state().status.as_deref(), Some("Drag cancelled"));
        assert!(app.sink.tasks.is_empty());
    }

    #[test]
    fn press_on_empty_lane_selects_it() {
        let (mut app, _) = app_with_task();
        pointer(&mut app, PointerPhase::Down, 50, 6);
        pointer(&mut app, PointerPhase::Up, 50, 6);

        assert_eq!(app.state().selected_lane, 2);
        assert!(!app.state().prompt.is_open());
    }

    #[test]
    fn add_cycle_and_delete_task() {
        let (mut app, _) = app_with_task();
        app.update(Message::SelectLaneRight);
        app.update(Message::AddTask);
        assert_eq!(
            app.state().prompt.current().map(|p| p.input.as_str()),
            Some("New task 10:00-11:00")
        );
        assert_eq!(app.state().zone().tasks.len(), 1);
        app.update(Message::PromptConfirm);

        let id = app.state().selected_task.expect("new task selected");
        let added = task(&app, id);
        assert_eq!((added.lane_index, added.top, added.height), (1, 320, 160));
        assert_eq!(added.color, Some(TradeColor::Carpenter));

        app.update(Message::CycleColor);
        assert_eq!(task(&app, id).color, Some(TradeColor::Rebar));

        app.update(Message::DeleteTask);
        assert!(app.state().zone().get_task(id).is_none());
        assert_eq!(app.state().selected_task, None);
        assert_eq!(app.sink.tasks.len(), 3);
        assert_eq!(app.state().status.as_deref(), Some("Task deleted: New task"));
    }

    #[test]
    fn add_task_from_label_and_time_range() {
        let (mut app, _) = app_with_task();
        app.update(Message::AddTask);
        clear_prompt(&mut app);
        type_text(&mut app, "Pour 09:10-10:00");
        app.update(Message::PromptConfirm);

        let id = app.state().selected_task.expect("new task selected");
        let added = task(&app, id);
        assert_eq!(added.text, "Pour");
        assert_eq!((added.lane_index, added.top, added.height), (0, 160, 160));
        assert_eq!(app.sink.tasks.len(), 1);
        assert_eq!(app.state().status.as_deref(), Some("Task added"));
    }

    #[test]
    fn bad_task_entry_adds_nothing() {
        let (mut app, id) = app_with_task();
        app.update(Message::AddTask);
        clear_prompt(&mut app);
        type_text(&mut app, "Pour 10:00-09:00");
        app.update(Message::PromptConfirm);

        assert_eq!(app.state().zone().tasks.len(), 1);
        assert_eq!(app.state().selected_task, Some(id));
        assert!(app.sink.tasks.is_empty());
        assert!(
            app.state()
                .status
                .as_deref()
                .is_some_and(|s| s.contains("must end after it starts"))
        );
    }

    #[test]
    fn add_lane_through_prompt() {
        let (mut app, _) = app_with_task();
        app.update(Message::AddLane);
        type_text(&mut app, "Plumbing");
        app.update(Message::PromptConfirm);

        let zone = app.state().zone();
        assert_eq!(zone.lanes.last().map(String::as_str), Some("Plumbing"));
        assert_eq!(app.state().selected_lane, 4);
        assert_eq!(app.sink.lanes.len(), 1);
        assert_eq!(app.sink.lanes[0].1.len(), 5);
    }

    #[test]
    fn blank_lane_name_is_rejected() {
        let (mut app, _) = app_with_task();
        app.update(Message::AddLane);
        type_text(&mut app, "   ");
        app.update(Message::PromptConfirm);

        assert_eq!(app.state().zone().lane_count(), 4);
        assert!(app.sink.lanes.is_empty());
        assert!(
            app.state()
                .status
                .as_deref()
                .is_some_and(|s| s.contains("invalid lane name"))
        );
    }

    #[test]
    fn next_zone_clears_selection() {
        let (mut app, id) = app_with_task();
        pointer(&mut app, PointerPhase::Down, 10, 13);
        pointer(&mut app, PointerPhase::Up, 10, 13);
        app.update(Message::PromptCancel);
        assert_eq!(app.state().selected_task, Some(id));

        app.update(Message::NextZone);

        assert_eq!(app.state().zone().id, ZoneId::new("B"));
        assert_eq!(app.state().selected_task, None);
    }

    #[test]
    fn scroll_is_clamped_to_the_day() {
        let (mut app, _) = app_with_task();
        app.update(Message::ScrollUp);
        assert_eq!(app.state().scroll, 0);

        for _ in 0..50 {
            app.update(Message::ScrollDown);
        }
        // 36 rows in the day, 25 visible
        assert_eq!(app.state().scroll, 11);
    }

    #[test]
    fn scrolled_drag_uses_grid_rows() {
        let (mut app, id) = app_with_task();
        for _ in 0..4 {
            app.update(Message::ScrollDown);
        }
        // bar rows 8..12 now on screen rows 8..=11
        pointer(&mut app, PointerPhase::Down, 10, 9);
        pointer(&mut app, PointerPhase::Move, 10, 10);
        pointer(&mut app, PointerPhase::Up, 10, 10);

        assert_eq!(task(&app, id).top, 360);
    }

    // --- Graceful degradation tests ---

    #[test]
    fn view_shows_too_small_message() {
        let (mut app, _) = app_with_task();
        let content = draw(&mut app, 30, 24);

        assert!(!app.header_visible);
        assert!(content.contains("Terminal too small"));
    }

    #[test]
    fn view_hides_header_in_compact_mode() {
        let (mut app, _) = app_with_task();
        let content = draw(&mut app, 86, MIN_HEIGHT);

        assert!(!app.header_visible);
        assert!(!content.contains("sitegrid"));
        assert!(content.contains("Carpenter"));
    }

    #[test]
    fn view_shows_header_and_bars() {
        let (mut app, _) = app_with_task();
        let content = draw(&mut app, WIDTH, HEIGHT);

        assert!(app.header_visible);
        assert!(content.contains("sitegrid - Zone A"));
        assert!(content.contains("Press ? for help"));
        assert!(content.contains("Forms"));
        assert!(content.contains("10:00 ~ 11:00"));
        assert!(content.contains(" Zone A "));
    }

    #[test]
    fn view_renders_prompt_and_help_on_top() {
        let (mut app, _) = app_with_task();
        app.update(Message::AddLane);
        type_text(&mut app, "Glazing");
        let content = draw(&mut app, WIDTH, HEIGHT);
        assert!(content.contains("New lane"));
        assert!(content.contains("> Glazing"));
    }

    #[test]
    fn compact_mode_maps_pointer_without_header() {
        let (mut app, id) = app_with_task();
        // 86x10: no header, lane names on row 0, grid row r on screen row 1 + r
        draw(&mut app, 86, 10);
        for _ in 0..8 {
            app.update(Message::ScrollDown);
        }
        // first visible grid row is 8, the bar's top handle
        pointer(&mut app, PointerPhase::Down, 10, 1);
        pointer(&mut app, PointerPhase::Move, 10, 2);
        pointer(&mut app, PointerPhase::Up, 10, 2);

        let resized = task(&app, id);
        assert_eq!((resized.top, resized.height), (360, 120));
    }
}
