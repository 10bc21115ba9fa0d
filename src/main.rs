use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use emotion_counter::capture::ReplaySource;
use emotion_counter::config::Config;
use emotion_counter::device::{CounterSink, NullSink, SerialSink};
use emotion_counter::display::TerminalDisplay;
use emotion_counter::pipeline::run_frame_loop;

/// Count sustained smiles and sad faces from a face-landmark feed
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded frames to replay (JSON lines of face landmarks)
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Config file (defaults to ~/.emotioncounter/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial port of the counter display device (e.g. /dev/ttyACM0, COM6)
    #[arg(long)]
    serial_port: Option<String>,

    /// Serial baud rate
    #[arg(long)]
    baud_rate: Option<u32>,

    /// Wait per frame in milliseconds (frame-rate throttle)
    #[arg(long)]
    frame_delay_ms: Option<u64>,

    /// Write the effective config to the config path and exit
    #[arg(long)]
    save_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref port) = self.serial_port {
            config.serial_port = Some(port.clone());
        }
        if let Some(baud) = self.baud_rate {
            config.baud_rate = baud;
        }
        if let Some(delay) = self.frame_delay_ms {
            config.frame_delay_ms = delay;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };
    let mut config = Config::load(&config_path)?;
    args.apply_overrides(&mut config);

    if args.save_config {
        config.save(&config_path)?;
        println!("Config written to {:?}", config_path);
        return Ok(());
    }

    let Some(replay_path) = args.replay.clone() else {
        eprintln!("\nNo frame source given.");
        eprintln!("Replay recorded face landmarks with: --replay /path/to/frames.jsonl");
        eprintln!("Each line: {{\"width\":640,\"height\":480,\"faces\":[{{\"landmarks\":[...]}}]}}");
        return Ok(());
    };

    info!("Emotion counter starting...");
    info!("Config: {:?}", config_path);

    let source = ReplaySource::open(&replay_path)
        .with_context(|| format!("Failed to open replay {:?}", replay_path))?;

    let sink: Box<dyn CounterSink + Send> = match config.serial_sink_config() {
        Some(serial) => {
            info!("Sending counts to {}", serial.port);
            Box::new(SerialSink::open(&serial).context("Failed to open counter device")?)
        }
        None => Box::new(NullSink),
    };

    let display = TerminalDisplay::stdout(&config.window_title, config.frame_delay_ms);

    let stop_flag = Arc::new(AtomicBool::new(false));

    // Set up Ctrl+C handler
    let stop_flag_ctrlc = stop_flag.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, stopping...");
        stop_flag_ctrlc.store(true, Ordering::SeqCst);
    });

    println!("\nCounting... Press Ctrl+C to stop.\n");

    // The frame loop blocks on capture and display, so keep it off the runtime
    let loop_stop = stop_flag.clone();
    let session = tokio::task::spawn_blocking(move || {
        let mut source = source;
        let mut display = display;
        let mut sink = sink;
        run_frame_loop(&mut source, &mut display, &mut *sink, &loop_stop)
    })
    .await
    .context("Frame loop panicked")?;

    let session = match session {
        Ok(session) => session,
        Err(e) => {
            error!("Frame loop failed: {}", e);
            return Err(e);
        }
    };

    println!("\n--- Session Summary ---");
    println!("{}", session.summary());

    if !session.episodes.is_empty() {
        println!("\n--- Episodes ---\n");
        for episode in &session.episodes {
            println!(
                "[frame {:>6}] {} at {}",
                episode.frame_index,
                episode.emotion,
                episode.counted_at.format("%H:%M:%S%.3f")
            );
        }
    }

    info!("Session complete");
    Ok(())
}
