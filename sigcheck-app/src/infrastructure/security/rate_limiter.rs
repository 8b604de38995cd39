use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

const MAX_REQUESTS_PER_MINUTE: u32 = 5;
const MAX_REQUESTS_PER_HOUR: u32 = 20;
const CLEANUP_INTERVAL_SECS: u64 = 300;

#[derive(Clone, Copy)]
struct Window {
    count: u32,
    started: Instant,
}

impl Window {
    fn new() -> Self {
        Self {
            count: 0,
            started: Instant::now(),
        }
    }

    /// Restarts the window if its span has elapsed, then reports whether
    /// another request fits under `limit`.
    fn admit(&mut self, now: Instant, span: Duration, limit: u32) -> Result<(), u64> {
        if now.duration_since(self.started) > span {
            self.count = 0;
            self.started = now;
        }
        if self.count >= limit {
            let wait = span.as_secs() - now.duration_since(self.started).as_secs();
            return Err(wait);
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
struct RequestRecord {
    minute: Window,
    hour: Window,
}

impl Default for RequestRecord {
    fn default() -> Self {
        Self {
            minute: Window::new(),
            hour: Window::new(),
        }
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<DashMap<IpAddr, RequestRecord>>,
    last_cleanup: Arc<std::sync::Mutex<Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(std::sync::Mutex::new(Instant::now())),
        }
    }

    pub fn check_rate_limit(&self, ip: IpAddr) -> Result<(), RateLimitError> {
        self.maybe_cleanup();

        let now = Instant::now();
        let mut record = self.requests.entry(ip).or_default();

        record
            .minute
            .admit(now, Duration::from_secs(60), MAX_REQUESTS_PER_MINUTE)
            .map_err(RateLimitError::TooManyRequestsPerMinute)?;
        record
            .hour
            .admit(now, Duration::from_secs(3600), MAX_REQUESTS_PER_HOUR)
            .map_err(RateLimitError::TooManyRequestsPerHour)?;

        record.minute.count += 1;
        record.hour.count += 1;

        Ok(())
    }

    fn maybe_cleanup(&self) {
        let mut last_cleanup = self.last_cleanup.lock().unwrap();
        if last_cleanup.elapsed() > Duration::from_secs(CLEANUP_INTERVAL_SECS) {
            let cutoff = Instant::now() - Duration::from_secs(3600);
            self.requests.retain(|_, v| v.hour.started > cutoff);
            *last_cleanup = Instant::now();
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub enum RateLimitError {
    TooManyRequestsPerMinute(u64),
    TooManyRequestsPerHour(u64),
}

impl RateLimitError {
    pub fn user_message(&self) -> String {
        match self {
            Self::TooManyRequestsPerMinute(secs) => {
                format!("Too many requests. Try again in {} seconds.", secs)
            }
            Self::TooManyRequestsPerHour(secs) => {
                format!(
                    "Hourly limit reached. Try again in {} minutes.",
                    secs / 60
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_allows_up_to_minute_limit() {
        let limiter = RateLimiter::new();
        let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));

        for _ in 0..MAX_REQUESTS_PER_MINUTE {
            assert!(limiter.check_rate_limit(ip).is_ok());
        }
        assert!(matches!(
            limiter.check_rate_limit(ip),
            Err(RateLimitError::TooManyRequestsPerMinute(_))
        ));
    }

    #[test]
    fn test_limits_are_per_ip() {
        let limiter = RateLimiter::new();
        let first = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let second = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

        for _ in 0..MAX_REQUESTS_PER_MINUTE {
            assert!(limiter.check_rate_limit(first).is_ok());
        }
        assert!(limiter.check_rate_limit(second).is_ok());
    }
}
