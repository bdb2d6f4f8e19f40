use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Single-threaded pump that feeds terminal input to the desktop.
///
/// The handler is called with `None` once per turn, before waiting for input,
/// which is where the caller advances time and redraws. Input then arrives as
/// `Some(event)`. Once one event is ready, everything already queued is
/// drained before the next redraw so a fast drag doesn't leave the window
/// trailing behind the pointer.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(None)? == ControlFlow::Quit {
                return Ok(());
            }
            if !self.driver.poll(self.poll_interval)? {
                continue;
            }
            loop {
                let event = self.driver.read()?;
                if handler(Some(event))? == ControlFlow::Quit {
                    return Ok(());
                }
                if !self.driver.poll(Duration::ZERO)? {
                    break;
                }
            }
        }
    }
}
