//! Webserver process state
//!
//! The engine itself is stateless; the only state this process tracks is
//! its own lifecycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

#[derive(Debug)]
pub struct ServerState {
    is_running: AtomicBool,
    server_start_time: Instant,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            is_running: AtomicBool::new(true),
            server_start_time: Instant::now(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    pub fn set_running(&self, running: bool) {
        self.is_running.store(running, Ordering::Relaxed);
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
