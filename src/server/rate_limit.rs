//! Fixed-window, per-IP request limiting.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::state::AppState;
use crate::config::RateLimitConfig;
use crate::error::BabelError;

/// Windows are pruned once this many clients are tracked.
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

pub struct RateLimiter {
    enabled: bool,
    window: Duration,
    max_requests: u32,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            window: Duration::from_secs(config.window_secs),
            max_requests: config.max_requests,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn check(&self, ip: IpAddr) -> Result<(), BabelError> {
        self.check_at(ip, Instant::now())
    }

    pub fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), BabelError> {
        if !self.enabled {
            return Ok(());
        }
        let mut windows = self
            .windows
            .lock()
            .map_err(|e| BabelError::Internal(format!("rate limiter lock poisoned: {e}")))?;

        if windows.len() >= PRUNE_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }
        if entry.count >= self.max_requests {
            let elapsed = now.duration_since(entry.started);
            let retry_after_secs = self.window.saturating_sub(elapsed).as_secs().max(1);
            return Err(BabelError::RateLimited { retry_after_secs });
        }
        entry.count += 1;
        Ok(())
    }
}

/// Middleware: reject over-limit clients with 429. Health checks are exempt.
pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if request.uri().path() == "/api/health" {
        return next.run(request).await;
    }
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    match state.limiter().check(ip) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            tracing::warn!(ip = %ip, "rate limit exceeded");
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            enabled: true,
            window_secs: 60,
            max_requests,
        })
    }

    #[test]
    fn allows_up_to_ceiling_then_rejects() {
        let l = limiter(3);
        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let now = Instant::now();
        for _ in 0..3 {
            l.check_at(ip, now).unwrap();
        }
        let err = l.check_at(ip, now).unwrap_err();
        assert_eq!(err, BabelError::RateLimited { retry_after_secs: 60 });
    }

    #[test]
    fn window_resets() {
        let l = limiter(1);
        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let start = Instant::now();
        l.check_at(ip, start).unwrap();
        assert!(l.check_at(ip, start + Duration::from_secs(30)).is_err());
        l.check_at(ip, start + Duration::from_secs(61)).unwrap();
    }

    #[test]
    fn clients_are_tracked_separately() {
        let l = limiter(1);
        let now = Instant::now();
        l.check_at(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), now).unwrap();
        l.check_at(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)), now).unwrap();
    }

    #[test]
    fn disabled_limiter_allows_everything() {
        let l = RateLimiter::new(&RateLimitConfig {
            enabled: false,
            window_secs: 1,
            max_requests: 1,
        });
        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);
        for _ in 0..10 {
            l.check(ip).unwrap();
        }
    }
}
