//! Crossterm event loop hosting a single [`TodoWidget`] panel.
//!
//! Two background threads feed the loop: one forwards terminal input, the
//! other emits [`AppEvent::RefreshTick`] at the configured interval. The
//! request itself runs as a tokio task and comes back as
//! [`AppEvent::Fetched`], so painting and input never wait on the network.
//! Every event is handled on the main thread and the widget is never shared.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use issueboard_core::{GiteaSettings, RemoteIssueClient};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tokio::runtime::Handle;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::colors;
use crate::markup;
use crate::scroll::{ScrollSelectionModel, ScrollableList};
use crate::widget::TodoWidget;
use crate::widget::commands::{WidgetCommand, help_text};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);
const TICKER_GRANULARITY: Duration = Duration::from_millis(200);

pub struct App {
    widget: TodoWidget<ScrollableList>,
    show_help: bool,
    should_exit: bool,
    fetch_in_flight: bool,
    app_event_tx: AppEventSender,
    runtime: Handle,
}

impl App {
    /// `runtime` runs the fetch tasks; their results are delivered through
    /// `app_event_tx`.
    pub fn new(
        widget: TodoWidget<ScrollableList>,
        app_event_tx: AppEventSender,
        runtime: Handle,
    ) -> Self {
        Self {
            widget,
            show_help: false,
            should_exit: false,
            fetch_in_flight: false,
            app_event_tx,
            runtime,
        }
    }

    pub fn widget(&self) -> &TodoWidget<ScrollableList> {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut TodoWidget<ScrollableList> {
        &mut self.widget
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn fetch_in_flight(&self) -> bool {
        self.fetch_in_flight
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::KeyEvent(key) => self.handle_key(key),
            AppEvent::RefreshTick => self.start_refresh(),
            AppEvent::Fetched(result) => {
                self.fetch_in_flight = false;
                self.widget.commit(result);
            }
            AppEvent::RequestRedraw => {}
        }
    }

    /// Spawn a fetch unless one is already running. Ticks that arrive
    /// while a request is outstanding are dropped.
    fn start_refresh(&mut self) {
        if self.fetch_in_flight {
            tracing::debug!("refresh already in flight");
            return;
        }
        let Some(fetch) = self.widget.begin_refresh() else {
            return;
        };

        self.fetch_in_flight = true;
        let tx = self.app_event_tx.clone();
        self.runtime.spawn(async move {
            let result = fetch.run().await;
            tx.send(AppEvent::Fetched(result));
        });
    }

    /// Apply one key press. Quit keys are handled here; everything else is
    /// mapped to a [`WidgetCommand`].
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        let quit = match key.code {
            KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
            KeyCode::Char('q') => key.modifiers.is_empty(),
            _ => false,
        };
        if quit {
            self.should_exit = true;
            return;
        }

        if self.show_help && key.code == KeyCode::Esc {
            self.show_help = false;
            return;
        }

        let Some(command) = WidgetCommand::from_key(key) else {
            return;
        };
        tracing::trace!(?command, "key command");

        match command {
            WidgetCommand::Refresh => self.start_refresh(),
            WidgetCommand::MarkAsDone => self.widget.mark_as_done(),
            WidgetCommand::Open => self.widget.open_todo(),
            WidgetCommand::Next => self.widget.selection_mut().next(),
            WidgetCommand::Prev => self.widget.selection_mut().prev(),
            WidgetCommand::Unselect => self.widget.selection_mut().unselect(),
            WidgetCommand::ToggleHelp => self.show_help = !self.show_help,
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.widget
            .set_view_width(usize::from(area.width.saturating_sub(2)));

        let content = self.widget.content();
        let border_color = if self.widget.selection().is_focused() {
            colors::border_focused()
        } else {
            colors::border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(
                format!(" {} ", content.title),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if content.is_error {
            let paragraph = Paragraph::new(content.body)
                .style(Style::default().fg(colors::error()))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, inner);
        } else {
            let parsed = markup::parse(&content.body);
            let height = usize::from(inner.height);
            let total = parsed.lines.len();
            let selected_line = self
                .widget
                .selection()
                .selected()
                .and_then(|idx| parsed.region_line(&idx.to_string()));
            let list = self.widget.selection_mut();
            let offset = match selected_line {
                Some(line) => list.scroll_to_line(line, height, total),
                None => list.scroll_offset().min(total.saturating_sub(height)),
            };
            let offset = u16::try_from(offset).unwrap_or(u16::MAX);
            frame.render_widget(Paragraph::new(parsed.lines).scroll((offset, 0)), inner);
        }

        if self.show_help {
            self.draw_help(frame, area);
        }
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let text = help_text();
        let lines: Vec<Line<'static>> = text.lines().map(|l| Line::from(l.to_string())).collect();
        let width = lines
            .iter()
            .map(Line::width)
            .max()
            .unwrap_or(0)
            .saturating_add(4);
        let height = lines.len().saturating_add(2);
        let popup = centered(
            area,
            u16::try_from(width).unwrap_or(u16::MAX),
            u16::try_from(height).unwrap_or(u16::MAX),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::border_focused()))
            .title(format!(" {} ", self.widget.settings().title));
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(Style::default().fg(colors::text_dim())),
            popup,
        );
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        rx: &Receiver<AppEvent>,
    ) -> io::Result<()> {
        terminal.draw(|frame| self.draw(frame))?;

        while let Ok(event) = rx.recv() {
            self.handle_event(event);
            if self.should_exit {
                break;
            }
            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Raw mode plus alternate screen for as long as the guard lives.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        if let Err(err) = crossterm::execute!(
            io::stdout(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide
        ) {
            let _ = crossterm::terminal::disable_raw_mode();
            return Err(err);
        }
        match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = crossterm::terminal::disable_raw_mode();
                let _ = crossterm::execute!(
                    io::stdout(),
                    crossterm::terminal::LeaveAlternateScreen,
                    crossterm::cursor::Show
                );
                Err(err)
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            self.terminal.backend_mut(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
    }
}

fn spawn_input_thread(tx: AppEventSender, shutdown: Arc<AtomicBool>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !shutdown.load(Ordering::Relaxed) {
            let ready = match event::poll(INPUT_POLL_INTERVAL) {
                Ok(ready) => ready,
                Err(err) => {
                    tracing::warn!("terminal poll failed: {err}");
                    break;
                }
            };
            if !ready {
                continue;
            }
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => tx.send(AppEvent::KeyEvent(key)),
                Ok(Event::Resize(..)) => tx.send(AppEvent::RequestRedraw),
                Ok(_) => true,
                Err(err) => {
                    tracing::warn!("terminal read failed: {err}");
                    false
                }
            };
            if !forwarded {
                break;
            }
        }
    })
}

/// Emit a refresh tick now and then once per `interval` until shutdown.
fn spawn_refresh_ticker(
    tx: AppEventSender,
    interval: Duration,
    shutdown: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            if shutdown.load(Ordering::Relaxed) || !tx.send(AppEvent::RefreshTick) {
                return;
            }
            let deadline = Instant::now() + interval;
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                if shutdown.load(Ordering::Relaxed) {
                    return;
                }
                thread::sleep(remaining.min(TICKER_GRANULARITY));
            }
        }
    })
}

/// Build the panel around `client` and run until the user quits.
pub fn run(settings: GiteaSettings, client: Arc<dyn RemoteIssueClient>) -> color_eyre::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("issueboard-fetch")
        .enable_all()
        .build()?;

    let (tx, rx) = mpsc::channel();
    let sender = AppEventSender::new(tx);
    let interval = Duration::from_secs(settings.refresh_interval_secs);

    let mut list = ScrollableList::new(settings.colors.clone());
    list.set_focused(settings.focusable);
    let widget = TodoWidget::new(client, list, settings).with_redraw_sender(sender.clone());
    let mut app = App::new(widget, sender.clone(), runtime.handle().clone());

    let mut guard = TerminalGuard::enter()?;
    let shutdown = Arc::new(AtomicBool::new(false));
    let input = spawn_input_thread(sender.clone(), Arc::clone(&shutdown));
    let ticker = spawn_refresh_ticker(sender, interval, Arc::clone(&shutdown));

    let result = app.event_loop(&mut guard.terminal, &rx);

    shutdown.store(true, Ordering::Relaxed);
    drop(rx);
    if input.join().is_err() {
        tracing::warn!("input thread panicked");
    }
    if ticker.join().is_err() {
        tracing::warn!("refresh ticker panicked");
    }
    drop(guard);
    // A request still waiting on the tracker must not hold up exit.
    runtime.shutdown_background();

    result?;
    Ok(())
}
