use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use clap::Args;
use interval_timer_core::display::{self, FanfareBanner};
use interval_timer_core::{CueDispatcher, IntervalStateMachine, Phase, Settings, TickOutcome};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::bell::TerminalBell;

const TICK_PERIOD: Duration = Duration::from_millis(100);
const BAR_WIDTH: usize = 24;

#[derive(Args)]
pub struct RunArgs {
    /// Work duration in seconds (overrides settings)
    #[arg(long)]
    work: Option<u32>,
    /// Rest duration in seconds (overrides settings)
    #[arg(long)]
    rest: Option<u32>,
    /// Lead-up duration in seconds, 0 to skip (overrides settings)
    #[arg(long)]
    lead_up: Option<u32>,
    /// Number of rounds (overrides settings)
    #[arg(long)]
    rounds: Option<u32>,
    /// Load durations from a preset slot (1-3) before applying overrides
    #[arg(long)]
    preset: Option<usize>,
    /// Print JSON snapshots instead of a status line
    #[arg(long)]
    json: bool,
    /// Do not ring the terminal bell
    #[arg(long)]
    silent: bool,
}

/// Keyboard commands read from stdin, one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Pause,
    Resume,
    Stop,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" => Some(Command::Pause),
            "r" | "resume" => Some(Command::Resume),
            "s" | "stop" => Some(Command::Stop),
            "q" | "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Settings for this run: preset first, then command-line overrides.
fn build_settings(args: &RunArgs) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = Settings::load_or_default();
    if let Some(slot) = args.preset {
        settings.load_preset(slot)?;
    }
    let overrides = [
        ("work_duration", args.work),
        ("rest_duration", args.rest),
        ("lead_up_duration", args.lead_up),
        ("rounds", args.rounds),
    ];
    for (key, value) in overrides {
        if let Some(value) = value {
            settings.set(key, &value.to_string())?;
        }
    }
    Ok(settings)
}

/// Blocking stdin reader on its own thread; tokio's stdin is not meant for
/// interactive input.
fn spawn_command_reader(tx: mpsc::UnboundedSender<Command>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match Command::parse(&line) {
                Some(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => warn!(input = line.trim(), "unknown command (use p, r, s or q)"),
            }
        }
    });
}

struct Renderer {
    json: bool,
    last: Option<(Phase, u32, u64)>,
}

impl Renderer {
    fn render(
        &mut self,
        timer: &IntervalStateMachine,
        outcome: &TickOutcome,
        fanfare: Option<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let key = (outcome.phase, outcome.current_round, outcome.remaining_secs);
        let changed = self.last != Some(key);
        self.last = Some(key);

        let mut out = std::io::stdout().lock();
        if self.json {
            if changed {
                writeln!(out, "{}", serde_json::to_string(&timer.display())?)?;
            }
            for event in &outcome.events {
                writeln!(out, "{}", serde_json::to_string(event)?)?;
            }
            return Ok(());
        }

        if !changed && fanfare.is_none() {
            return Ok(());
        }
        let snap = timer.display();
        let filled = (snap.progress * BAR_WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)));
        let line = match fanfare {
            Some(message) => message,
            None => format!(
                "{:<17} {:<14} {} [{}]",
                snap.phase.label(),
                display::round_label(snap.current_round, snap.total_rounds),
                display::format_clock(snap.remaining_secs),
                bar
            ),
        };
        write!(out, "\r\x1b[2K{line}")?;
        out.flush()?;
        Ok(())
    }

    /// Emit the state the run ended in if the last tick did not show it,
    /// e.g. `idle` after a stop command.
    fn finish(&mut self, timer: &IntervalStateMachine) -> Result<(), Box<dyn std::error::Error>> {
        let key = (timer.phase(), timer.current_round(), timer.remaining_secs());
        let mut out = std::io::stdout().lock();
        if self.json {
            if self.last != Some(key) {
                writeln!(out, "{}", serde_json::to_string(&timer.display())?)?;
            }
        } else {
            writeln!(out)?;
        }
        self.last = Some(key);
        Ok(())
    }
}

/// The status line lingers on the fanfare banner; JSON consumers already
/// have the event and are done on the idle tick.
fn run_over(phase: Phase, json: bool, banner: &FanfareBanner) -> bool {
    phase.is_idle() && (json || !banner.is_visible())
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = build_settings(&args)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_loop(settings, args.json, args.silent))
}

async fn run_loop(
    settings: Settings,
    json: bool,
    silent: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut timer = IntervalStateMachine::new(settings.phase_config());
    let mut dispatcher = CueDispatcher::new(TerminalBell::new(!silent));
    let mut banner = FanfareBanner::new();
    let mut renderer = Renderer { json, last: None };

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_command_reader(tx);
    if !json {
        eprintln!("commands: p = pause, r = resume, s = stop, q = quit");
    }

    timer.start(Instant::now())?;

    let mut interval = tokio::time::interval(TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = Instant::now();
                let outcome = timer.tick(now);
                dispatcher.dispatch(&outcome);
                if outcome.fanfare() && !json {
                    banner.trigger(now);
                }
                let message = banner.message(now, timer.config().total_rounds);
                renderer.render(&timer, &outcome, message)?;
                if run_over(outcome.phase, json, &banner) {
                    break;
                }
            }
            Some(cmd) = rx.recv() => {
                let now = Instant::now();
                debug!(?cmd, "command received");
                match cmd {
                    Command::Pause => { timer.pause(now); }
                    Command::Resume => { timer.resume(now); }
                    Command::Stop | Command::Quit => {
                        timer.stop();
                        break;
                    }
                }
            }
            _ = &mut ctrl_c => {
                timer.stop();
                break;
            }
        }
    }

    renderer.finish(&timer)?;
    if dispatcher.failures() > 0 {
        warn!(failures = dispatcher.failures(), "some sound cues could not be played");
    }
    info!("timer finished");
    Ok(())
}
