use std::io::BufRead;
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use error_stack::ResultExt;
use log::info;

use handsign::camera::CameraProc;
use handsign::config::Config;
use handsign::display::{LogDisplay, QUIT_HINT};
use handsign::models::{HandLandmarker, RecordedLandmarks};
use handsign::{App, GError, LandmarkSource};

/// Recognizes hand gestures on a live camera feed
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
    /// Replay recorded landmarks (JSON lines) instead of running the model
    #[arg(long)]
    replay: Option<PathBuf>,
}

fn main() -> error_stack::Result<(), GError> {
    env_logger::init();

    let Args { config, replay } = Args::parse();

    let config = if config.exists() {
        Config::open(config)?
    } else {
        info!("{} not found, using defaults", config.display());
        Config::default()
    };

    let camera = CameraProc::connect(&config.camera)?;
    let landmarks: Box<dyn LandmarkSource> = match replay {
        Some(path) => Box::new(RecordedLandmarks::open(path)?),
        None => Box::new(HandLandmarker::connect(config.detector.clone())?),
    };

    let (quit_tx, quit_rx) = flume::bounded(1);
    thread::Builder::new()
        .name("quit".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) if line.trim() == "q" => {
                        let _ = quit_tx.send(());
                        return;
                    }
                    Ok(_) => {}
                    Err(_) => return,
                }
            }
        })
        .change_context(GError::CommError)?;

    info!("{QUIT_HINT}");
    let mut app = App::new(camera, landmarks, LogDisplay::new());
    app.run(&quit_rx)
}
