mod ui;

use aimtrain::{
    config::{FileSettingsStore, Settings, SettingsStore},
    coords::Point,
    intercept,
    pattern::MotionPattern,
    report::Report,
    runtime::{AimEvent, CrosstermEventSource, FixedTicker, Runner},
    session::{Effect, Session, SessionEvent},
    setup::SetupForm,
    surface::ClickSurface,
    target::{Target, Velocity},
};
use anyhow::{bail, Context};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::rngs::StdRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Frame, Terminal,
};
use std::{
    fs::OpenOptions,
    io::{self, stdin},
    path::{Path, PathBuf},
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// terminal aim trainer: where to move the mouse to hit a moving target
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Click a crosshair position, get a moving target, and see the exact mouse movement (in inches, for your DPI and reaction time) that lands on it."
)]
pub struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    /// mouse sensitivity in counts per inch
    #[clap(short = 'd', long, global = true)]
    dpi: Option<u32>,

    /// reaction time in milliseconds
    #[clap(short = 'r', long, global = true)]
    reaction_ms: Option<u32>,

    /// screen width in pixels
    #[clap(long, global = true)]
    screen_width: Option<u32>,

    /// screen height in pixels
    #[clap(long, global = true)]
    screen_height: Option<u32>,

    /// json settings preset to start from (defaults to the config dir preset if present)
    #[clap(long, global = true)]
    settings: Option<PathBuf>,

    /// start training immediately with the given settings
    #[clap(long)]
    skip_setup: bool,

    /// seed for target generation, for reproducible rounds
    #[clap(long)]
    seed: Option<u64>,

    /// write logs to this file (the terminal is owned by the UI)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// compute one optimal movement without the UI
    Solve {
        /// crosshair position in screen pixels, as x,y
        #[clap(long, value_parser = parse_point, allow_hyphen_values = true)]
        cursor: Point,

        /// target initial position in screen pixels, as x,y
        #[clap(long, value_parser = parse_point, allow_hyphen_values = true)]
        target: Point,

        /// target velocity in px/s as sx,sy (screen y grows downwards)
        #[clap(long, value_parser = parse_velocity, allow_hyphen_values = true, default_value = "0,0")]
        velocity: Velocity,

        /// print the result as json
        #[clap(long)]
        json: bool,
    },
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two comma separated numbers, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| format!("'{v}' is not a finite number"))
    };
    Ok((parse(a)?, parse(b)?))
}

fn parse_point(s: &str) -> Result<Point, String> {
    parse_pair(s).map(Point::from)
}

fn parse_velocity(s: &str) -> Result<Velocity, String> {
    parse_pair(s).map(|(sx, sy)| Velocity::new(sx, sy))
}

impl Cli {
    /// Defaults, then the preset file, then explicit flags
    fn resolve_settings(&self) -> anyhow::Result<Settings> {
        let store = match &self.settings {
            Some(path) => FileSettingsStore::with_path(path),
            None => FileSettingsStore::new(),
        };
        let preset = store
            .load()
            .with_context(|| format!("reading settings preset {}", store.path().display()))?;
        if preset.is_none() && self.settings.is_some() {
            bail!("settings preset {} does not exist", store.path().display());
        }

        let mut settings = preset.unwrap_or_default();
        if let Some(dpi) = self.dpi {
            settings.dpi = dpi;
        }
        if let Some(reaction_ms) = self.reaction_ms {
            settings.reaction_ms = reaction_ms;
        }
        if let Some(width) = self.screen_width {
            settings.screen_width = width;
        }
        if let Some(height) = self.screen_height {
            settings.screen_height = height;
        }
        Ok(settings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Setup,
    Training,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub initial_settings: Settings,
    pub setup: SetupForm,
    pub session: Option<Session<StdRng>>,
    pub surface: ClickSurface,
    pub seed: Option<u64>,
    pub notice: Option<String>,
}

impl App {
    pub fn new(settings: Settings, seed: Option<u64>) -> Self {
        Self {
            state: AppState::Setup,
            initial_settings: settings,
            setup: SetupForm::new(settings),
            session: None,
            surface: ClickSurface::new(),
            seed,
            notice: None,
        }
    }

    /// Validate the form and open a session. Returns whether training started.
    pub fn submit_setup(&mut self) -> bool {
        if self.setup.submit().is_err() {
            return false;
        }
        match Session::start(&self.setup.settings, self.seed) {
            Ok(session) => {
                self.session = Some(session);
                self.surface.reset();
                self.notice = None;
                self.state = AppState::Training;
                true
            }
            Err(e) => {
                self.setup.error = Some(e.to_string());
                false
            }
        }
    }

    /// Left click at a terminal cell; `area` is the full frame
    pub fn on_click(&mut self, column: u16, row: u16, area: Rect) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let inner = ui::training_layout(area).canvas_inner;
        let Some((local_x, local_y)) = ui::plot::local_position(column, row, inner) else {
            return;
        };

        let position = match session.config().geometry.map(
            local_x,
            local_y,
            f64::from(inner.width),
            f64::from(inner.height),
        ) {
            Ok(position) => position,
            Err(e) => {
                log::warn!("discarding click at ({column}, {row}): {e}");
                return;
            }
        };

        let sample = self.surface.record(position);
        self.dispatch(SessionEvent::Pointer(sample));
    }

    pub fn request_new_target(&mut self) {
        self.dispatch(SessionEvent::NewTarget);
    }

    pub fn reset_settings(&mut self) {
        self.dispatch(SessionEvent::ResetSettings);
    }

    fn dispatch(&mut self, event: SessionEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.handle(event) {
            Ok(effects) => {
                self.notice = None;
                self.apply(effects);
            }
            Err(e) => {
                log::warn!("discarding {event:?}: {e}");
                self.notice = Some(e.to_string());
            }
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RebuildSurface { epoch } => self.surface.rebuild(epoch),
                Effect::ReturnToSetup => {
                    self.session = None;
                    self.surface.reset();
                    self.setup = SetupForm::new(self.initial_settings);
                    self.state = AppState::Setup;
                }
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Flow::Quit;
        }

        match self.state {
            AppState::Setup => match key.code {
                KeyCode::Up | KeyCode::BackTab => self.setup.select_prev(),
                KeyCode::Down | KeyCode::Tab => self.setup.select_next(),
                KeyCode::Left => self.setup.adjust(-1),
                KeyCode::Right => self.setup.adjust(1),
                KeyCode::PageDown => self.setup.adjust(-10),
                KeyCode::PageUp => self.setup.adjust(10),
                KeyCode::Enter => {
                    self.submit_setup();
                }
                _ => {}
            },
            AppState::Training => match key.code {
                KeyCode::Char('n') => self.request_new_target(),
                KeyCode::Char('s') => self.reset_settings(),
                KeyCode::Char('q') => return Flow::Quit,
                _ => {}
            },
        }
        Flow::Continue
    }
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr would draw over the alternate screen
        None if interactive => {
            builder.target(env_logger::Target::Pipe(Box::new(io::sink())));
        }
        None => {}
    }

    builder.init();
    Ok(())
}

fn run_solve(
    settings: &Settings,
    cursor: Point,
    target: Point,
    velocity: Velocity,
    json: bool,
) -> anyhow::Result<()> {
    let config = settings.validate().context("invalid settings")?;
    let target = Target::new(
        target,
        velocity,
        MotionPattern::from_velocity(velocity.sx, velocity.sy),
    );
    let interception = intercept::compute(cursor, &target, config.reaction_secs, config.dpi)?;
    let report = Report::new(&config, cursor, &target, &interception);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (label, value) in report.lines().into_iter().chain(report.position_details()) {
            println!("{label}: {value}");
        }
        println!("{}", report.summary());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.command.is_none())?;
    let settings = cli.resolve_settings()?;

    if let Some(Command::Solve {
        cursor,
        target,
        velocity,
        json,
    }) = cli.command
    {
        return run_solve(&settings, cursor, target, velocity, json);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(settings, cli.seed);
    if cli.skip_setup && !app.submit_setup() {
        bail!(
            "cannot start training: {}",
            app.setup.error.as_deref().unwrap_or("invalid settings")
        );
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            AimEvent::Tick => continue,
            AimEvent::Resize => {}
            AimEvent::Mouse(mouse) => {
                if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
                    continue;
                }
                let size = terminal.size()?;
                app.on_click(
                    mouse.column,
                    mouse.row,
                    Rect::new(0, 0, size.width, size.height),
                );
            }
            AimEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    ui::screen::current_screen(&app.state).render(app, f);
}
