//! Fixed-window request quota per client.
//!
//! Each client key owns a window that opens on its first request. Up to
//! `max_requests` calls are admitted until the window ends; after that the
//! caller is told how long to wait. Rejected calls leave the counter alone.

use std::time::{Duration, Instant};

use dashmap::DashMap;

pub const DEFAULT_MAX_REQUESTS: u32 = 50;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(900);
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after_secs: u64 },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    clients: DashMap<String, Window>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

impl RateLimiter {
    /// `max_requests == 0` disables limiting.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: DashMap::new(),
        }
    }

    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        if self.max_requests == 0 {
            return RateLimitDecision::Allowed { remaining: u32::MAX };
        }

        // The entry guard holds the shard lock, so check and increment happen together.
        let mut entry = self
            .clients
            .entry(key.to_owned())
            .or_insert(Window { started: now, count: 0 });

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            let remaining = self.window.saturating_sub(now.saturating_duration_since(entry.started));
            return RateLimitDecision::Limited {
                retry_after_secs: ceil_secs(remaining).max(1),
            };
        }

        entry.count += 1;
        RateLimitDecision::Allowed {
            remaining: self.max_requests - entry.count,
        }
    }

    /// Drop clients whose window has ended.
    pub fn sweep_expired(&self, now: Instant) -> usize {
        let before = self.clients.len();
        self.clients
            .retain(|_, window| now.saturating_duration_since(window.started) < self.window);
        before.saturating_sub(self.clients.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}
