use std::sync::Mutex;

pub struct SessionMetrics {
    inner: Mutex<Counters>,
}

struct Counters {
    started: usize,
    stopped: usize,
    failed_starts: usize,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters {
                started: 0,
                stopped: 0,
                failed_starts: 0,
            }),
        }
    }

    pub fn record_started(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.started += 1;
        }
    }

    pub fn record_stopped(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.stopped += 1;
        }
    }

    pub fn record_failed_start(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.failed_starts += 1;
        }
    }

    /// (started, stopped, failed starts)
    pub fn snapshot(&self) -> (usize, usize, usize) {
        if let Ok(counters) = self.inner.lock() {
            (counters.started, counters.stopped, counters.failed_starts)
        } else {
            (0, 0, 0)
        }
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
