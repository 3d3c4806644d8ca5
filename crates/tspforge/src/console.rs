//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats the structured events of
//! `tspforge_solver` with colors. Enabled by the `console` feature and
//! initialized on the first [`solve`](crate::solve) call.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the TspForge banner and sets up tracing. Leaves an already
/// installed global subscriber in place.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "tspforge_solver=info".parse() {
            filter = filter.add_directive(directive);
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 _____            _____
|_   _|__ _ __   |  ___|__  _ __ __ _  ___
  | |/ __| '_ \  | |_ / _ \| '__/ _` |/ _ \
  | |\__ \ |_) | |  _| (_) | | | (_| |  __/
  |_||___/ .__/  |_|  \___/|_|  \__, |\___|
         |_|                    |___/
"#;

    let version_line = format!(
        "          v{} - Exact, Approximate and Heuristic Tours\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("tspforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_solver_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    algorithm: Option<String>,
    selector: Option<String>,
    num_cities: Option<u64>,
    dp_states: Option<u64>,
    duration_ms: Option<u64>,
    steps: Option<u64>,
    moves_evaluated: Option<u64>,
    moves_per_sec: Option<u64>,
    cost: Option<f64>,
    is_optimal: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            "algorithm" => self.algorithm = Some(value.to_string()),
            "selector" => self.selector = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "num_cities" => self.num_cities = Some(value),
            "dp_states" => self.dp_states = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "steps" => self.steps = Some(value),
            "moves_evaluated" => self.moves_evaluated = Some(value),
            "moves_per_sec" => self.moves_per_sec = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "cost" {
            self.cost = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "is_optimal" {
            self.is_optimal = Some(value);
        }
    }
}

fn format_solver_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "solve_end" => format_solve_end(v),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    let num_cities = v.num_cities.unwrap_or(0);
    let selector = v.selector.as_deref().unwrap_or("auto");
    let algorithm = v.algorithm.as_deref().unwrap_or("unknown");

    format!(
        "{} {} {} {} cities, selector ({}) -> {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        num_cities.to_formatted_string(&Locale::en).bright_yellow(),
        selector.white(),
        algorithm.white().bold()
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let mut output = format!(
        "{} {} {} {} started",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold()
    );
    if let Some(states) = v.dp_states {
        output.push_str(&format!(
            ", table size ({} states)",
            states.to_formatted_string(&Locale::en).bright_magenta()
        ));
    }
    output
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let mut output = format!(
        "{} {} {} {} ended: time spent ({}), cost ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_cost(v.cost).bright_green()
    );
    if let Some(steps) = v.steps {
        output.push_str(&format!(
            ", step total ({})",
            steps.to_formatted_string(&Locale::en).white()
        ));
    }
    if let (Some(evaluated), Some(rate)) = (v.moves_evaluated, v.moves_per_sec) {
        output.push_str(&format!(
            ", evaluations ({}) at ({}/sec)",
            evaluated.to_formatted_string(&Locale::en).white(),
            rate.to_formatted_string(&Locale::en).bright_magenta().bold()
        ));
    }
    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let algorithm = v.algorithm.as_deref().unwrap_or("unknown");
    let cost = format_cost(v.cost);
    let optimal = v.is_optimal.unwrap_or(false);

    let mut output = format!(
        "{} {} {} Solving ended: cost ({}) in {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        cost.bright_green(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');

    let status_text = if optimal { "OPTIMAL TOUR" } else { "HEURISTIC TOUR" };
    let status_padding = 56 - status_text.len() - 4;
    let left_pad = status_padding / 2;
    let right_pad = status_padding - left_pad;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        format!("  {}  ", status_text).bright_green().bold(),
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&"╠══════════════════════════════════════════════════════════╣".bright_cyan().to_string());
    output.push('\n');
    for (label, value) in [("Algorithm:", algorithm.to_string()), ("Tour cost:", cost)] {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }
    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_cost(cost: Option<f64>) -> String {
    match cost {
        Some(cost) => format!("{:.2}", cost),
        None => "N/A".to_string(),
    }
}
