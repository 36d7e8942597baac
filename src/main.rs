use anyhow::Context;
use clap::{CommandFactory, Parser};
use owl_overlay::batch::{BatchRunner, BatchStatus, FailurePolicy};
use owl_overlay::constants::{DEFAULT_PRESET, OVERLAY_ASSET_FILE};
use owl_overlay::logging::{init_subscriber, LogFormat};
use owl_overlay::overlay::{OverlayCompositor, PresetLookup, PresetTable};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Exit code reported when the batch is interrupted (128 + SIGINT)
const EXIT_CANCELLED: u8 = 130;

/// Owl Overlay - add a translucent mascot to slide images
#[derive(Parser, Debug)]
#[command(name = "owl-overlay")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing slide_*.png files
    input_dir: Option<PathBuf>,

    /// Placement preset name
    #[arg(default_value = DEFAULT_PRESET)]
    preset: String,

    /// Output directory (default: sibling "<input>-with-owl")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overlay asset (default: owl_image_nobg.png next to the executable)
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// YAML file replacing the built-in preset table
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Reject unknown preset names instead of falling back
    #[arg(long)]
    strict: bool,

    /// Keep processing remaining slides after a failure
    #[arg(long)]
    keep_going: bool,

    /// Log output format (pretty or json)
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_subscriber(args.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let presets = match &args.presets {
        Some(path) => PresetTable::from_file(path)
            .with_context(|| format!("Failed to load presets from {}", path.display()))?,
        None => PresetTable::builtin(),
    };

    let input_dir = match args.input_dir {
        Some(dir) => dir,
        None => {
            print_usage(&presets);
            return Ok(ExitCode::from(1));
        }
    };

    let overlay_path = args.overlay.unwrap_or_else(default_overlay_path);
    let lookup = if args.strict {
        PresetLookup::Strict
    } else {
        PresetLookup::Fallback
    };
    let policy = if args.keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };

    let compositor = OverlayCompositor::new(overlay_path, presets).with_lookup(lookup);
    let runner = BatchRunner::new(compositor)
        .with_policy(policy)
        .with_cancel_flag(register_cancel_flag());

    let report = runner
        .run(&input_dir, args.output.as_deref(), &args.preset)
        .with_context(|| format!("Batch failed for {}", input_dir.display()))?;

    let code = match report.status {
        BatchStatus::Cancelled => ExitCode::from(EXIT_CANCELLED),
        BatchStatus::NoInputs => ExitCode::SUCCESS,
        BatchStatus::Completed if report.failed.is_empty() => ExitCode::SUCCESS,
        BatchStatus::Completed => {
            for failed in &report.failed {
                eprintln!("Failed: {}: {}", failed.input.display(), failed.error);
            }
            ExitCode::FAILURE
        }
    };

    Ok(code)
}

/// Mascot asset bundled next to the running executable.
fn default_overlay_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(OVERLAY_ASSET_FILE)))
        .unwrap_or_else(|| PathBuf::from(OVERLAY_ASSET_FILE))
}

/// Flag raised by SIGINT/SIGTERM so the batch stops between slides.
fn register_cancel_flag() -> Arc<AtomicBool> {
    let cancel = Arc::new(AtomicBool::new(false));

    #[cfg(unix)]
    {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::flag;

        for signal in [SIGINT, SIGTERM] {
            if let Err(e) = flag::register(signal, Arc::clone(&cancel)) {
                tracing::warn!(signal, error = %e, "Failed to register signal handler");
            }
        }
    }

    cancel
}

fn print_usage(presets: &PresetTable) {
    eprintln!("{}", Args::command().render_usage());
    eprintln!();
    eprintln!("Available presets:");
    for preset in presets.iter() {
        eprintln!(
            "  {:15} - {}% size, {} opacity, {}",
            preset.name,
            preset.placement.size_percent,
            preset.placement.opacity,
            preset.placement.position
        );
    }
    eprintln!();
    eprintln!("Example:");
    eprintln!("  owl-overlay output-v2/psych-cost bottom-right");
}
