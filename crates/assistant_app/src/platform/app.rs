use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use assistant_core::{update, AppState, Effect, Msg};
use assistant_logging::{assistant_info, assistant_warn};
use crossterm::event::{self, Event};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::files;
use super::input::{self, Command};
use super::logging::{self, LogDestination};
use super::terminal::{TerminalGuard, Tui};
use super::ui::{self, constants::SCROLL_STEP, UiState};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("reading working directory")?;
    let config = AppConfig::load(&cwd);

    logging::initialize(
        LogDestination::File(config.log_file.clone()),
        logging::level_from_env(),
    );
    for warning in &config.warnings {
        assistant_warn!("{}", warning);
    }
    assistant_info!(
        "Starting assistant ({:?}) against {}",
        config.environment,
        config.base_url
    );

    let settings = config
        .client_settings()
        .with_context(|| format!("invalid backend url {:?}", config.base_url))?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(settings, msg_tx).context("starting request engine")?;

    let mut guard = TerminalGuard::enter().context("preparing terminal")?;
    let mut app = App::new(runner, msg_rx);
    let result = app.run(guard.terminal());
    drop(guard);

    assistant_info!("Assistant stopped");
    result
}

struct App {
    state: AppState,
    ui: UiState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    redraw: bool,
    should_quit: bool,
}

impl App {
    fn new(runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>) -> Self {
        Self {
            state: AppState::new(),
            ui: UiState::default(),
            runner,
            msg_rx,
            redraw: true,
            should_quit: false,
        }
    }

    fn run(&mut self, terminal: &mut Tui) -> anyhow::Result<()> {
        while !self.should_quit {
            self.process_pending_messages();

            if self.state.consume_dirty() || self.redraw {
                let view = self.state.view();
                let ui = &mut self.ui;
                terminal.draw(|frame| ui::render::render(frame, &view, ui))?;
                self.redraw = false;
            }

            if event::poll(POLL_INTERVAL)? {
                let event = event::read()?;
                self.handle_event(event);
            }
        }
        Ok(())
    }

    fn process_pending_messages(&mut self) {
        let inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        for msg in inbox {
            self.dispatch(msg);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            match effect {
                Effect::ScrollTranscriptToBottom => {
                    self.ui.scroll.pin_to_bottom();
                    self.redraw = true;
                }
                network => self.runner.enqueue(network),
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        let command = match event {
            Event::Key(key) => input::map_key(key, self.state.draft(), self.ui.picker.as_deref()),
            Event::Paste(text) => {
                input::map_paste(&text, self.state.draft(), self.ui.picker.as_deref())
            }
            Event::Mouse(mouse) => {
                input::map_mouse(mouse, &self.ui.hitboxes, self.state.drag_active())
            }
            Event::Resize(..) => {
                self.redraw = true;
                Command::Ignore
            }
            _ => Command::Ignore,
        };
        self.execute(command);
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Dispatch(msg) => {
                self.ui.status = None;
                self.dispatch(msg);
            }
            Command::Drop(path) => self.drop_file(&path),
            Command::OpenPicker => {
                self.ui.picker = Some(String::new());
                self.redraw = true;
            }
            Command::ClosePicker => {
                self.ui.picker = None;
                self.redraw = true;
            }
            Command::EditPicker(text) => {
                self.ui.picker = Some(text);
                self.redraw = true;
            }
            Command::SubmitPicker => self.submit_picker(),
            Command::ScrollUp => {
                self.ui.scroll.scroll_up(SCROLL_STEP);
                self.redraw = true;
            }
            Command::ScrollDown => {
                self.ui.scroll.scroll_down(SCROLL_STEP);
                self.redraw = true;
            }
            Command::Quit => self.should_quit = true,
            Command::Ignore => {}
        }
    }

    fn drop_file(&mut self, path: &Path) {
        self.dispatch(Msg::DragEntered);
        match files::read_selected_file(path) {
            Ok(file) => {
                assistant_info!("Dropped {:?}", path);
                self.dispatch(Msg::FileDropped(file));
            }
            Err(err) => {
                assistant_warn!("Drop failed: {}", err);
                self.dispatch(Msg::DragLeft);
                self.set_status(err.to_string());
            }
        }
    }

    fn submit_picker(&mut self) {
        let Some(raw) = self.ui.picker.clone() else {
            return;
        };
        let path = Path::new(raw.trim());
        match files::read_selected_file(path) {
            Ok(file) => {
                self.ui.picker = None;
                if !files::has_csv_extension(path) {
                    assistant_warn!("Selected non-csv file {:?}", path);
                }
                self.dispatch(Msg::FileSelected(file));
                self.redraw = true;
            }
            Err(err) => {
                assistant_warn!("File selection failed: {}", err);
                self.set_status(err.to_string());
            }
        }
    }

    fn set_status(&mut self, text: String) {
        self.ui.status = Some(text);
        self.redraw = true;
    }
}
