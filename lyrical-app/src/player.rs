use lyrical_core::time::{format_clock, format_seconds};
use lyrical_core::{Clock, CoreError, Frame, SongSession};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Drive `session` at `frame_rate` until the last line ends or `cancel_token`
/// fires, printing each line as it becomes active.
pub async fn run<C: Clock>(
    mut session: SongSession<C>,
    frame_rate: u32,
    start_ms: i64,
    cancel_token: CancellationToken,
) -> Result<(), CoreError> {
    let metadata = &session.sheet().metadata;
    println!("{} - {}", metadata.artist, metadata.title);
    println!("Charted by {}", metadata.charter);

    if session.sheet().is_empty() {
        println!("(no lines)");
        return Ok(());
    }

    session.play()?;
    if start_ms > 0 {
        session.skip(start_ms)?;
    }

    let mut interval = tokio::time::interval(Duration::from_secs(1) / frame_rate.max(1));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut shown: Option<usize> = None;

    loop {
        tokio::select! {
            () = cancel_token.cancelled() => {
                info!("Playback cancelled at {}s", format_seconds(session.timestamp_ms()));
                break;
            }
            _ = interval.tick() => {
                let frame = session.frame();
                if frame.active_index != shown {
                    shown = frame.active_index;
                    print_line(&session, &frame);
                }
                if frame.finished {
                    debug!("Reached the end of the last line");
                    break;
                }
            }
        }
    }

    session.stop();
    Ok(())
}

fn print_line<C: Clock>(session: &SongSession<C>, frame: &Frame) {
    let Some(cue) = frame.active_index.and_then(|index| session.sheet().get(index)) else {
        return;
    };
    println!(
        "[{} - {}] {}",
        format_clock(cue.begin),
        format_clock(cue.end),
        cue.text
    );
}
