// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::{Duration, Instant};

pub(crate) const STATUS_TTL: Duration = Duration::from_secs(4);

/// Tracks when the status line was last written so the run loop can clear it.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StatusClock {
    written_at: Option<Instant>,
}

impl StatusClock {
    pub fn touch(&mut self, now: Instant) {
        self.written_at = Some(now);
    }

    /// True once per write, after the message has been visible long enough.
    pub fn take_expired(&mut self, now: Instant) -> bool {
        match self.written_at {
            Some(at) if now.saturating_duration_since(at) >= STATUS_TTL => {
                self.written_at = None;
                true
            }
            _ => false,
        }
    }
}
