//! waybutton-rs: a clickable button module for Waybar.
//!
//! Reads events from stdin (values, icon categories, clicks) and prints one
//! Waybar JSON line per update. Logs go to stderr.

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use waybutton_rs_button::{
    ButtonModule, ButtonOptions, ClickEvent, ClickHandler, InputEvent, Reading,
};
use waybutton_rs_core::{ButtonError, ModuleConfig, WaybarOutput};

/// Config key read only by this binary, equivalent to `--enable-click`.
/// Waybar itself has no such option.
const ENABLE_CLICK_KEY: &str = "enable-click";

/// Command-line arguments for the button module.
#[derive(Parser)]
#[command(name = "waybutton-rs")]
#[command(about = "Clickable button module for Waybar")]
#[command(version)]
#[command(author)]
struct Args {
    /// Module config file (.json or .ron); defaults to ~/.config/waybutton-rs/config.json
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Module name
    #[arg(short, long, default_value = "button")]
    name: String,

    /// Module id, added as a CSS class
    #[arg(long, default_value = "")]
    id: String,

    /// Format used when the config has none
    #[arg(short, long, default_value = "{icon} {percentage}%")]
    format: String,

    /// Re-emit interval in seconds when the config has none
    #[arg(short, long, default_value = "60", value_parser = validate_interval)]
    interval: u64,

    /// Initial percentage
    #[arg(short, long, default_value = "0")]
    percentage: u16,

    /// Scale of the percentage (0 means 100)
    #[arg(short, long, default_value = "0")]
    max: u16,

    /// Icon categories to try, in order
    #[arg(long, value_delimiter = ',')]
    category: Vec<String>,

    /// Classify states with `<=` instead of `>=`
    #[arg(long)]
    lesser: bool,

    /// Accept clicks even without click-related config.
    /// A boolean "enable-click" key in the config file does the same
    /// (that key is specific to waybutton-rs, not a Waybar option)
    #[arg(long)]
    enable_click: bool,

    /// One-shot mode (output once and exit)
    #[arg(short, long)]
    once: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Validate that the interval is at least one second.
fn validate_interval(s: &str) -> Result<u64, String> {
    let interval = s
        .parse::<u64>()
        .map_err(|_| "Interval must be a positive integer".to_owned())?;

    if interval == 0 {
        return Err("Interval must be at least 1 second".to_owned());
    }

    Ok(interval)
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Generic click handling: run the command bound to the clicked button.
fn run_click_action(event: &ClickEvent, action: Option<&str>) {
    let Some(command) = action else {
        debug!(button = %event.button, "no command bound to button");
        return;
    };

    let spawned = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .spawn()
        .map_err(|e| ButtonError::spawn(command, e));

    match spawned {
        // The child is reaped by the runtime once it exits.
        Ok(_child) => debug!(button = %event.button, command, "spawned click command"),
        Err(e) => warn!("{}", e),
    }
}

/// Render the module and print one JSON line.
fn emit<W: Write>(
    module: &ButtonModule,
    output: &mut WaybarOutput,
    reading: &Reading,
    out: &mut W,
) -> anyhow::Result<()> {
    module.update(reading, output);
    output.set_percentage(reading.percentage);

    let mut line = output.clone();
    line.text = module.layout().fit(&line.text);

    writeln!(out, "{}", serde_json::to_string(&line)?)?;
    out.flush()?;
    Ok(())
}

/// Apply one input line. Returns false when nothing changed.
fn apply_event<H: ClickHandler + ?Sized>(
    module: &mut ButtonModule,
    reading: &mut Reading,
    line: &str,
    handler: &mut H,
) -> bool {
    if line.trim().is_empty() {
        return false;
    }

    match line.parse::<InputEvent>() {
        Ok(InputEvent::Value(percentage)) => reading.set_percentage(percentage),
        Ok(InputEvent::Categories(categories)) => reading.categories = categories,
        Ok(InputEvent::Click(button)) => {
            module.handle_click(&ClickEvent::new(button), handler);
        }
        Ok(InputEvent::Press) => {
            module.press(handler);
        }
        Err(e) => {
            warn!("Ignoring input line: {}", e);
            return false;
        }
    }
    true
}

/// Continuous mode: print a line after every input event and on every tick.
///
/// End of input only stops event reading; the ticker keeps running until the
/// process is killed.
async fn run_events<R, W, H>(
    module: &mut ButtonModule,
    output: &mut WaybarOutput,
    reading: &mut Reading,
    input: R,
    out: &mut W,
    period: Duration,
    handler: &mut H,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    H: ClickHandler + ?Sized,
{
    let mut lines = input.lines();
    let mut input_open = true;
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
    // The first tick completes immediately; the initial line is already out.
    ticker.tick().await;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    debug!("stdin closed, re-emitting on the interval only");
                    input_open = false;
                    continue;
                };
                if !apply_event(module, reading, &line, handler) {
                    continue;
                }
            }
            _ = ticker.tick() => {}
        }

        emit(module, output, reading, out)?;
    }
}

/// Main entry point for the button module.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => ModuleConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ModuleConfig::load().context("Failed to load config")?,
    };

    let enable_click = args.enable_click
        || config.view().get(ENABLE_CLICK_KEY).as_bool().unwrap_or(false);
    let options = ButtonOptions::new(args.name.as_str())
        .with_id(args.id.as_str())
        .with_format(args.format.as_str())
        .with_interval(Duration::from_secs(args.interval))
        .with_enable_click(enable_click);

    let mut module = ButtonModule::new(config, options);
    let mut output = WaybarOutput::default();
    module.attach(&mut output);

    let mut reading = Reading::new(args.percentage)
        .with_max(args.max)
        .with_lesser(args.lesser)
        .with_categories(args.category.iter().map(String::as_str));

    emit(&module, &mut output, &reading, &mut io::stdout())?;
    if args.once {
        return Ok(());
    }

    info!(
        name = module.name(),
        interactive = module.is_interactive(),
        "waiting for events on stdin"
    );

    let period = module_period(&module);
    let mut stdout = io::stdout();
    run_events(
        &mut module,
        &mut output,
        &mut reading,
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
        period,
        &mut run_click_action,
    )
    .await?;
    Ok(())
}

/// Re-emit period; tokio rejects a zero-length interval.
fn module_period(module: &ButtonModule) -> Duration {
    module.interval().max(Duration::from_secs(1))
}
