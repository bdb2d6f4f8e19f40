use std::io;
use std::time::{Duration, Instant};

use crate::desktop::Desktop;
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};

/// Drive `desktop` until it asks to quit or I/O fails.
///
/// The output driver is entered before the first frame and exited on the way
/// out regardless of how the loop ended. Every idle turn advances the panels
/// by the wall-clock time since the previous one and repaints.
pub fn run_desktop<I, O>(
    input: I,
    output: &mut O,
    desktop: &mut Desktop,
    poll_interval: Duration,
) -> io::Result<()>
where
    I: InputDriver,
    O: OutputDriver,
{
    output.enter()?;
    tracing::info!(poll_ms = poll_interval.as_millis() as u64, "desktop started");

    let mut last_tick = Instant::now();
    let mut pump = EventLoop::new(input, poll_interval);
    let result = pump.run(|event| match event {
        Some(event) => Ok(desktop.handle_event(&event)),
        None => {
            let now = Instant::now();
            desktop.tick(now.saturating_duration_since(last_tick));
            last_tick = now;
            output.draw(|mut frame| {
                desktop.fit_to(frame.area());
                desktop.render(&mut frame);
            })?;
            Ok(ControlFlow::Continue)
        }
    });

    let restored = output.exit();
    match &result {
        Ok(()) => tracing::info!("desktop stopped"),
        Err(err) => tracing::error!(error = %err, "desktop stopped on error"),
    }
    result.and(restored)
}
