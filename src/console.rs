// Copyright (c) 2026 matrixdeck contributors

use std::collections::VecDeque;

use rand::{
    distr::{Distribution, Uniform},
    Rng,
};

/// The console keeps this many log lines; older ones scroll away.
pub const LOG_CAPACITY: usize = 5;

pub const SIGNAL_STRENGTH: &str = "▮▮▮▮▯";

const BOOT_MESSAGE: &str = "MATRIX SIMULATION INITIALIZED";
const IDLE_STATUS: &str = "SYSTEM IDLE";

/// Rolling console log plus the status-bar fields. All flavor, no backing
/// computation: messages are canned strings and the node count is a die
/// roll.
pub struct Console {
    messages: VecDeque<String>,
    status: String,
    active_nodes: u8,
    rand_nodes: Uniform<u8>,
}

impl Console {
    pub fn new() -> Self {
        let mut messages = VecDeque::with_capacity(LOG_CAPACITY);
        messages.push_back(format!("> {}", BOOT_MESSAGE));
        Self {
            messages,
            status: IDLE_STATUS.to_string(),
            active_nodes: 1,
            rand_nodes: Uniform::new_inclusive(1, 100).expect("valid range"),
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn active_nodes(&self) -> u8 {
        self.active_nodes
    }

    /// Appends a log line and flips the status to processing. The oldest
    /// line is evicted once the log is full.
    pub fn add_message(&mut self, text: &str) {
        if self.messages.len() == LOG_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(format!("> {}", text));
        self.status = format!("PROCESSING: {}", text);
    }

    pub fn refresh_nodes<R: Rng>(&mut self, rng: &mut R) {
        self.active_nodes = self.rand_nodes.sample(rng);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn starts_with_boot_message_and_idle_status() {
        let c = Console::new();
        let lines: Vec<&str> = c.messages().collect();
        assert_eq!(lines, vec!["> MATRIX SIMULATION INITIALIZED"]);
        assert_eq!(c.status(), "SYSTEM IDLE");
    }

    #[test]
    fn add_message_prefixes_and_sets_status() {
        let mut c = Console::new();
        c.add_message("SCANNING NETWORK");
        let lines: Vec<&str> = c.messages().collect();
        assert_eq!(lines.last(), Some(&"> SCANNING NETWORK"));
        assert_eq!(c.status(), "PROCESSING: SCANNING NETWORK");
    }

    #[test]
    fn log_caps_at_five_lines_fifo() {
        let mut c = Console::new();
        for i in 0..7 {
            c.add_message(&format!("MSG {}", i));
        }
        let lines: Vec<&str> = c.messages().collect();
        assert_eq!(lines.len(), LOG_CAPACITY);
        // Boot line and MSG 0/1 evicted first.
        assert_eq!(lines.first(), Some(&"> MSG 2"));
        assert_eq!(lines.last(), Some(&"> MSG 6"));
    }

    #[test]
    fn node_count_stays_in_range() {
        let mut c = Console::new();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            c.refresh_nodes(&mut rng);
            assert!((1..=100).contains(&c.active_nodes()));
        }
    }
}
