//! Interactive foreground timer.
//!
//! One current-thread tokio runtime multiplexes three sources: the
//! one-second tick interval (present only while the timer runs), a render
//! frame interval for the status line, and command lines from stdin.

use std::io::Write;
use std::time::Duration;

use clap::Args;
use pomotimer_core::timer::progress::ring_fraction;
use pomotimer_core::{Config, Event, Phase, PhaseDurations, Session, StatsDb, TimerEngine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use super::parse_secs;
use crate::render;

const TICK: Duration = Duration::from_secs(1);
const FRAME: Duration = Duration::from_millis(200);

const HELP: &str = "commands: s start/pause | p pause | r reset | y/n answer long-break prompt | \
set focus|break|long <duration> | ? help | q quit";

#[derive(Args)]
pub struct RunArgs {
    /// Focus length for this run (25m, 90s, 1m30s, MM:SS)
    #[arg(long, value_parser = parse_secs, value_name = "DURATION")]
    focus: Option<u64>,
    /// Short break length for this run
    #[arg(long = "break", value_parser = parse_secs, value_name = "DURATION")]
    break_len: Option<u64>,
    /// Long break length for this run
    #[arg(long, value_parser = parse_secs, value_name = "DURATION")]
    long_break: Option<u64>,
    /// Do not ring the terminal bell when a phase ends
    #[arg(long)]
    no_bell: bool,
}

/// One line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Toggle,
    Pause,
    Reset,
    Yes,
    No,
    Set(Phase, String),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let mut words = line.split_whitespace();
    match words.next().map(str::to_ascii_lowercase).as_deref() {
        None => Input::Empty,
        Some("s" | "start" | "space") => Input::Toggle,
        Some("p" | "pause") => Input::Pause,
        Some("r" | "reset") => Input::Reset,
        Some("y" | "yes") => Input::Yes,
        Some("n" | "no") => Input::No,
        Some("?" | "h" | "help") => Input::Help,
        Some("q" | "quit" | "exit") => Input::Quit,
        Some("set") => {
            let phase = match words.next().map(str::to_ascii_lowercase).as_deref() {
                Some("focus") => Phase::Focus,
                Some("break") => Phase::Break,
                Some("long" | "long_break" | "longbreak") => Phase::LongBreak,
                _ => return Input::Unknown(line.to_string()),
            };
            match words.next() {
                Some(value) => Input::Set(phase, value.to_string()),
                None => Input::Unknown(line.to_string()),
            }
        }
        Some(_) => Input::Unknown(line.to_string()),
    }
}

fn config_key(phase: Phase) -> &'static str {
    match phase {
        Phase::Focus => "durations.focus_secs",
        Phase::Break => "durations.break_secs",
        Phase::LongBreak => "durations.long_break_secs",
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut durations = config.durations();
    if let Some(secs) = args.focus {
        durations.focus_ms = secs * 1000;
    }
    if let Some(secs) = args.break_len {
        durations.break_ms = secs * 1000;
    }
    if let Some(secs) = args.long_break {
        durations.long_break_ms = secs * 1000;
    }
    let bell = config.notifications.enabled && config.notifications.bell && !args.no_bell;

    let db = StatsDb::open()?;
    let engine = TimerEngine::new(durations, config.cycles_before_long_break);
    let session = Session::new(engine, db);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let result = runtime.block_on(event_loop(session, config, durations, bell));
    // A blocked stdin read cannot be cancelled; don't wait for it.
    runtime.shutdown_background();
    result
}

struct Loop {
    session: Session<StatsDb>,
    config: Config,
    durations: PhaseDurations,
    bell: bool,
    ticker: Option<Interval>,
    last_tick: Instant,
}

async fn event_loop(
    session: Session<StatsDb>,
    config: Config,
    durations: PhaseDurations,
    bell: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = Loop {
        session,
        config,
        durations,
        bell,
        ticker: None,
        last_tick: Instant::now(),
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut frame = time::interval(FRAME);
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

    println!("{HELP}");
    state.draw();

    loop {
        tokio::select! {
            _ = next_tick(&mut state.ticker) => {
                state.last_tick = Instant::now();
                let events = state.session.tick()?;
                state.announce(&events);
            }
            _ = frame.tick() => {
                if state.ticker.is_some() {
                    state.draw();
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                if !state.handle(parse_input(&line)) {
                    break;
                }
            }
        }
        state.sync_ticker();
    }

    println!();
    Ok(())
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(t) => {
            t.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

impl Loop {
    /// Returns false when the user asked to quit.
    fn handle(&mut self, input: Input) -> bool {
        match input {
            Input::Toggle if self.session.snapshot().running => {
                self.session.pause();
            }
            Input::Toggle => match self.session.start() {
                Ok(_) => {}
                Err(e) => self.say(&e.to_string()),
            },
            Input::Pause => {
                self.session.pause();
            }
            Input::Reset => {
                self.session.reset();
                self.say("Timer reset.");
            }
            Input::Yes => match self.session.confirm_long_break() {
                Ok(event) => self.announce(std::slice::from_ref(&event)),
                Err(e) => self.say(&e.to_string()),
            },
            Input::No => match self.session.decline_long_break() {
                Ok(_) => self.say("Long break skipped. Press s to start the next focus."),
                Err(e) => self.say(&e.to_string()),
            },
            Input::Set(phase, value) => self.set_duration(phase, &value),
            Input::Help => self.say(HELP),
            Input::Quit => return false,
            Input::Empty => {}
            Input::Unknown(line) => self.say(&format!("unknown command '{line}' (? for help)")),
        }
        self.draw();
        true
    }

    /// Invalid input keeps the previous value.
    fn set_duration(&mut self, phase: Phase, value: &str) {
        let key = config_key(phase);
        if let Err(e) = self.config.set(key, value) {
            warn!("duration change rejected: {e}");
            self.say(&format!("{e}"));
            return;
        }
        let ms = self.config.durations().for_phase(phase);
        match phase {
            Phase::Focus => self.durations.focus_ms = ms,
            Phase::Break => self.durations.break_ms = ms,
            Phase::LongBreak => self.durations.long_break_ms = ms,
        }
        self.session.set_durations(self.durations);
        self.say(&format!(
            "{} set to {}; applies from the next {}.",
            phase.label(),
            pomotimer_core::timer::format_clock(ms),
            phase
        ));
    }

    fn sync_ticker(&mut self) {
        let running = self.session.snapshot().running;
        match (running, self.ticker.is_some()) {
            (true, false) => {
                self.last_tick = Instant::now();
                self.ticker = Some(time::interval_at(self.last_tick + TICK, TICK));
            }
            (false, true) => {
                self.ticker = None;
                self.draw();
            }
            _ => {}
        }
    }

    fn announce(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::PhaseCompleted { phase, .. } => {
                    let mut msg = phase.finished_message().to_string();
                    if self.bell {
                        msg.push('\x07');
                    }
                    self.say(&msg);
                }
                Event::PhaseStarted {
                    phase,
                    running: false,
                    ..
                } => self.say(&format!("Next up: {}. Press s to start.", phase.label())),
                Event::LongBreakPending { cycle, .. } => self.say(&format!(
                    "Cycle {cycle} complete. Take a long break? [y/n]"
                )),
                _ => {}
            }
        }
        self.draw();
    }

    fn say(&self, msg: &str) {
        println!("\r\x1b[2K{msg}");
    }

    fn draw(&self) {
        let snapshot = self.session.snapshot();
        let since_tick = self.last_tick.elapsed().as_millis() as u64;
        let fraction = if snapshot.running {
            ring_fraction(snapshot.time_left_ms, snapshot.total_ms, since_tick)
        } else {
            ring_fraction(snapshot.time_left_ms, snapshot.total_ms, 0)
        };
        let line = render::status_line(
            &snapshot,
            self.session.engine().cycles_before_long_break(),
            fraction,
        );
        print!("\r\x1b[2K{line}");
        let _ = std::io::stdout().flush();
    }
}
