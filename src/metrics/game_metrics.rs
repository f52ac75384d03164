use std::time::{Duration, Instant};

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Longest snake seen this session
    pub record: usize,
    /// Self-collisions so far
    pub resets: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            record: 1,
            resets: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Fold a snake length into the record
    pub fn observe_length(&mut self, length: usize) {
        self.record = self.record.max(length);
    }

    pub fn on_reset(&mut self) {
        self.resets += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
