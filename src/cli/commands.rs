//! Command implementations

use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::adapters::SimulatedPlayer;
use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::app::ClipController;
use crate::cli::args::{ClipsArgs, PlayArgs, ReviewArgs};
use crate::domain::model::{ClipSpec, KeyEvent, KeyOutcome, MountPoint, TimeSpec};
use crate::error::{EchoSliceError, EchoSliceResult};

/// Element the player is mounted on
const PLAYER_MOUNT_ID: &str = "player";

/// Upper bound for `wait` and `--duration`
const MAX_SESSION_WAIT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// What the stdin loop should do after one command line
#[derive(Debug, Clone, PartialEq)]
enum LineAction {
    Continue,
    Wait(Duration),
    Quit,
}

/// Execute the play command
pub async fn play(args: PlayArgs, container: &DefaultAppContainer) -> Result<()> {
    let clip = resolve_clip(&args, container)?;
    info!("Playing clip {}", clip);

    let controller = container.clip_controller(clip.clone())?;
    if args.no_loop && controller.state().is_looping {
        controller.toggle_loop();
    }
    if args.no_captions && controller.state().is_captions_on {
        controller.toggle_captions();
    }

    let mount = MountPoint::new(PLAYER_MOUNT_ID);
    let loader = container.script_loader();
    controller
        .mount(&container.player_api(), loader.as_ref(), &mount)
        .await
        .context("Failed to construct player")?;

    let player = controller
        .handle()
        .and_then(|handle| container.player_factory().player_for(&handle));

    println!("Clip: {} ({:.1}s)", clip, clip.duration());
    println!("Controls: {}", controller.control_labels().as_vec().join(" | "));

    if args.autoplay {
        controller.play_from_start();
    }

    let deadline = match args.duration {
        Some(seconds) => match session_wait(seconds) {
            Some(duration) => Some(Instant::now() + duration),
            None => return Err(anyhow::anyhow!("Invalid duration: {}", seconds)),
        },
        None => None,
    };

    run_session(&controller, player.as_ref(), deadline).await?;

    controller.pause();

    if let Some(player) = &player {
        println!("Player commands:");
        for command in player.commands() {
            println!("  {}", command);
        }
    }
    println!("Final state: {}", status_line(&controller, player.as_ref()));

    controller.unmount();
    Ok(())
}

/// Read control commands from stdin until quit, EOF or the deadline
async fn run_session(
    controller: &ClipController,
    player: Option<&Arc<SimulatedPlayer>>,
    deadline: Option<Instant>,
) -> Result<()> {
    let mut lines = spawn_stdin_reader();

    loop {
        let line = match deadline {
            Some(deadline) => tokio::select! {
                line = lines.recv() => line,
                _ = tokio::time::sleep_until(deadline) => {
                    info!("Play duration elapsed");
                    return Ok(());
                }
            },
            None => lines.recv().await,
        };

        // After EOF keep playing until the deadline, if any
        let Some(line) = line else {
            debug!("stdin closed");
            if let Some(deadline) = deadline {
                tokio::time::sleep_until(deadline).await;
                info!("Play duration elapsed");
            }
            return Ok(());
        };

        match dispatch_line(controller, &line) {
            LineAction::Continue => {}
            LineAction::Wait(wait) => {
                let wait_until = Instant::now() + wait;
                let until = deadline.map_or(wait_until, |d| d.min(wait_until));
                tokio::time::sleep_until(until).await;
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    info!("Play duration elapsed");
                    return Ok(());
                }
            }
            LineAction::Quit => return Ok(()),
        }

        if line.trim() == "status" {
            println!("{}", status_line(controller, player));
        }
    }
}

/// Forward stdin lines from a detached thread; a pending read must not
/// hold up runtime shutdown.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Apply one stdin command to the controller
fn dispatch_line(controller: &ClipController, line: &str) -> LineAction {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return LineAction::Continue;
    };

    match command {
        "space" => {
            if let KeyOutcome::Handled { .. } = controller.handle_key_down(&KeyEvent::space()) {
                debug!("Space shortcut handled");
            }
        }
        "play" => controller.play_from_start(),
        "pause" => controller.pause(),
        "loop" => controller.toggle_loop(),
        "cc" => controller.toggle_captions(),
        "status" => {}
        "wait" => match words.next().map(str::parse::<f64>) {
            Some(Ok(seconds)) => match session_wait(seconds) {
                Some(wait) => return LineAction::Wait(wait),
                None => warn!("Usage: wait <seconds>"),
            },
            _ => warn!("Usage: wait <seconds>"),
        },
        "quit" | "exit" => return LineAction::Quit,
        other => warn!("Unknown command: {}", other),
    }

    LineAction::Continue
}

/// Seconds as a sleep length, capped at `MAX_SESSION_WAIT`; `None` if not representable
fn session_wait(seconds: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(seconds)
        .ok()
        .map(|wait| wait.min(MAX_SESSION_WAIT))
}

fn status_line(controller: &ClipController, player: Option<&Arc<SimulatedPlayer>>) -> String {
    let labels = controller.control_labels();
    let position = player
        .map(|p| TimeSpec::from_seconds(p.position()).to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} | position {} | {} | {}",
        controller.phase(),
        position,
        labels.looping,
        labels.captions
    )
}

/// Pick the clip from the catalog or from explicit bounds
fn resolve_clip(args: &PlayArgs, container: &DefaultAppContainer) -> EchoSliceResult<ClipSpec> {
    if let Some(clip_id) = args.clip_id {
        let entry = container.review_interactor().clip(clip_id)?;
        return Ok(entry.to_spec()?);
    }

    match (&args.video_id, &args.start, &args.end) {
        (Some(video_id), Some(start), Some(end)) => {
            let start = TimeSpec::parse(start).map_err(|_| EchoSliceError::InvalidTimeFormat {
                time: start.clone(),
            })?;
            let end = TimeSpec::parse(end).map_err(|_| EchoSliceError::InvalidTimeFormat {
                time: end.clone(),
            })?;
            Ok(ClipSpec::from_times(video_id.clone(), start, end)?)
        }
        (None, None, None) => {
            let interactor = container.review_interactor();
            let entry = interactor
                .list_clips()
                .into_iter()
                .next()
                .ok_or_else(|| EchoSliceError::MissingClip {
                    message: "the catalog is empty; pass --video-id, --start and --end".to_string(),
                })?;
            info!("No clip selected, using newest catalog clip {}", entry.id);
            Ok(entry.to_spec()?)
        }
        _ => Err(EchoSliceError::MissingClip {
            message: "--video-id, --start and --end must be given together".to_string(),
        }),
    }
}

/// Execute the clips command
pub fn clips(args: ClipsArgs, container: &DefaultAppContainer) -> Result<()> {
    let entries = container.review_interactor().list_clips();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No clips configured");
        return Ok(());
    }

    println!("Clips ({}):", entries.len());
    for entry in entries {
        println!(
            "  #{} {} [{} - {}] {}",
            entry.id,
            entry.video_id,
            TimeSpec::from_seconds(entry.start_sec),
            TimeSpec::from_seconds(entry.end_sec),
            entry.title.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

/// Execute the review command
pub fn review(args: ReviewArgs, container: &DefaultAppContainer) -> Result<()> {
    let record = container
        .review_interactor()
        .review(args.clip_id, args.score)
        .context("Failed to record review")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!(
            "Clip #{} scored {}: next review at {}",
            record.clip_id,
            record.score.value(),
            record.next_review_at
        );
    }
    Ok(())
}
