use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

use crate::capture::FrameSource;
use crate::device::CounterSink;
use crate::display::{Display, Overlay, KEY_ESC};
use crate::emotion::{classify_faces, StabilityFilter};
use crate::session::{EpisodeEvent, SessionRecord, StopReason};

/// Run the synchronous frame loop until capture ends, ESC, or the stop flag
///
/// Each iteration blocks on the source, then on the display; the display's
/// wait is the only throttle. Capture failures end the loop quietly.
pub fn run_frame_loop<S, D, K>(
    source: &mut S,
    display: &mut D,
    sink: &mut K,
    stop_flag: &AtomicBool,
) -> Result<SessionRecord>
where
    S: FrameSource + ?Sized,
    D: Display + ?Sized,
    K: CounterSink + ?Sized,
{
    let mut session = SessionRecord::new(source.describe());
    let mut filter = StabilityFilter::new();
    let mut sink_failures = 0u64;

    info!("Frame loop started: {}", session.source);

    let reason = loop {
        if stop_flag.load(Ordering::Relaxed) {
            info!("Stop flag received, ending frame loop");
            break StopReason::Interrupted;
        }

        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break StopReason::CaptureEnded,
            Err(e) => {
                warn!("Frame capture failed: {}", e);
                break StopReason::CaptureEnded;
            }
        };

        session.record_frame(frame.has_face());

        let classification = classify_faces(&frame);
        let update = filter.update(classification.label);

        if let Some(emotion) = update.counted {
            info!(
                "{} counted at frame {} (smile: {}, sad: {})",
                emotion,
                frame.index,
                filter.counters().smile,
                filter.counters().sad
            );
            session.add_episode(EpisodeEvent::new(emotion, frame.index));
        }

        if let Err(e) = sink.send(filter.counters()) {
            if sink_failures == 0 {
                warn!("Counter device write failed: {}", e);
            }
            sink_failures += 1;
        }

        let overlay = Overlay::new(
            frame.index,
            *filter.counters(),
            update.stable,
            &classification,
        );
        if display.show(&overlay)? == Some(KEY_ESC) {
            debug!("ESC pressed at frame {}", frame.index);
            break StopReason::EscapePressed;
        }
    };

    if sink_failures > 0 {
        warn!("Counter device writes failed {} time(s)", sink_failures);
    }

    session.finalize(*filter.counters(), reason);
    info!(
        "Frame loop stopped ({}): {} frames processed",
        reason.as_str(),
        session.frames_processed
    );
    Ok(session)
}
