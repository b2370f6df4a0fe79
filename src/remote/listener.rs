//! Keyboard remote listener
//!
//! Reads key presses on a background thread and pushes the decoded events into
//! the shared queue. The terminal stays in raw mode while the listener lives.

use super::keymap::{Input, Keymap};
use super::queue::SharedQueue;
use crate::{Result, TimerError};
use crossterm::event::{self, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// How long the listener blocks waiting for a key before rechecking shutdown
const POLL_INTERVAL_MS: u64 = 50;

/// Background key reader feeding a [`SharedQueue`]
pub struct KeyboardListener {
    running: Arc<AtomicBool>,
    quit: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl KeyboardListener {
    /// Put the terminal in raw mode and start reading keys
    pub fn spawn(queue: SharedQueue, keymap: Keymap) -> Result<Self> {
        enable_raw_mode()
            .map_err(|e| TimerError::InputError(format!("Failed to enable raw mode: {}", e)))?;

        let running = Arc::new(AtomicBool::new(true));
        let quit = Arc::new(AtomicBool::new(false));
        let running_clone = Arc::clone(&running);
        let quit_clone = Arc::clone(&quit);

        let handle = std::thread::Builder::new()
            .name("remote-listener".into())
            .spawn(move || {
                while running_clone.load(Ordering::Relaxed) {
                    match event::poll(Duration::from_millis(POLL_INTERVAL_MS)) {
                        Ok(true) => match event::read() {
                            Ok(Event::Key(key)) => {
                                if let Some(input) = keymap.map(&key) {
                                    dispatch(input, &queue, &quit_clone);
                                }
                            }
                            Ok(_) => {}
                            Err(e) => {
                                log::error!("failed to read key event: {e}");
                                quit_clone.store(true, Ordering::Relaxed);
                            }
                        },
                        Ok(false) => {}
                        Err(e) => {
                            log::error!("failed to poll key events: {e}");
                            quit_clone.store(true, Ordering::Relaxed);
                        }
                    }
                    if quit_clone.load(Ordering::Relaxed) {
                        break;
                    }
                }
            })
            .map_err(|e| {
                let _ = disable_raw_mode();
                TimerError::InputError(format!("Failed to spawn listener thread: {}", e))
            })?;

        Ok(KeyboardListener {
            running,
            quit,
            handle: Some(handle),
        })
    }

    /// True once a quit key was pressed or input failed
    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }

    /// Stop the thread and restore the terminal
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("remote listener thread panicked");
            }
            let _ = disable_raw_mode();
        }
    }
}

impl Drop for KeyboardListener {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Route one decoded input: remote events to the queue, quit to the flag
pub(crate) fn dispatch(input: Input, queue: &SharedQueue, quit: &AtomicBool) {
    match input {
        Input::Remote(event) => {
            if !queue.lock().push(event) {
                log::warn!("event queue full, dropped {event}");
            }
        }
        Input::Quit => quit.store(true, Ordering::Relaxed),
    }
}
