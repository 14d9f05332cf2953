use brewfest_errors::AppError;
use dashmap::DashMap;
use std::fmt;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(3600);
const SWEEP_EVERY: Duration = Duration::from_secs(300);

/// Caps for one kind of request, counted per client IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub name: &'static str,
    pub per_minute: u32,
    pub per_hour: u32,
}

impl RateLimit {
    /// Ballot stuffing guard for the public vote endpoints.
    pub const VOTES: Self = Self {
        name: "votes",
        per_minute: 20,
        per_hour: 200,
    };

    /// Password guessing guard for the admin login.
    pub const LOGINS: Self = Self {
        name: "admin logins",
        per_minute: 5,
        per_hour: 20,
    };
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/min {}/hour", self.name, self.per_minute, self.per_hour)
    }
}

/// Fixed window: hits counted since `opened`.
#[derive(Debug, Clone, Copy)]
struct Window {
    opened: Instant,
    hits: u32,
}

impl Window {
    fn open(now: Instant) -> Self {
        Self { opened: now, hits: 0 }
    }

    /// Seconds until the window reopens if it is already full.
    fn full(&mut self, now: Instant, span: Duration, cap: u32) -> Option<u64> {
        let age = now.saturating_duration_since(self.opened);
        if age >= span {
            *self = Self::open(now);
        }
        (self.hits >= cap).then(|| span.saturating_sub(age).as_secs().max(1))
    }
}

#[derive(Debug, Clone, Copy)]
struct Usage {
    minute: Window,
    hour: Window,
}

impl Usage {
    fn new(now: Instant) -> Self {
        Self {
            minute: Window::open(now),
            hour: Window::open(now),
        }
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    limit: RateLimit,
    usage: Arc<DashMap<IpAddr, Usage>>,
    last_sweep: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        Self {
            limit,
            usage: Arc::new(DashMap::new()),
            last_sweep: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn limit(&self) -> RateLimit {
        self.limit
    }

    /// Counts one request from `ip`, or refuses it when either window is full.
    /// Refused requests do not count.
    pub fn check_rate_limit(&self, ip: IpAddr) -> Result<(), RateLimitError> {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), RateLimitError> {
        self.sweep(now);

        let mut usage = self.usage.entry(ip).or_insert_with(|| Usage::new(now));

        if let Some(secs) = usage.minute.full(now, MINUTE, self.limit.per_minute) {
            tracing::warn!("{} from {} over the per-minute cap", self.limit.name, ip);
            return Err(RateLimitError::PerMinute(secs));
        }
        if let Some(secs) = usage.hour.full(now, HOUR, self.limit.per_hour) {
            tracing::warn!("{} from {} over the hourly cap", self.limit.name, ip);
            return Err(RateLimitError::PerHour(secs));
        }

        usage.minute.hits += 1;
        usage.hour.hits += 1;
        Ok(())
    }

    /// Forgets clients whose hourly window has run out.
    fn sweep(&self, now: Instant) {
        let Ok(mut last_sweep) = self.last_sweep.lock() else {
            return;
        };
        if now.saturating_duration_since(*last_sweep) < SWEEP_EVERY {
            return;
        }
        self.usage
            .retain(|_, usage| now.saturating_duration_since(usage.hour.opened) < HOUR);
        *last_sweep = now;
    }
}

/// Refusal carrying the seconds until the client may retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    PerMinute(u64),
    PerHour(u64),
}

impl RateLimitError {
    pub fn message(&self) -> String {
        match self {
            Self::PerMinute(secs) => format!("Too many attempts! Please wait {} seconds.", secs),
            Self::PerHour(secs) => format!(
                "You have reached the hourly limit. Please wait {} minutes.",
                secs.div_ceil(60)
            ),
        }
    }
}

impl From<RateLimitError> for AppError {
    fn from(err: RateLimitError) -> Self {
        AppError::RateLimited(err.message())
    }
}
