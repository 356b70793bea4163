use std::time::{Duration, Instant};

/// Time source for [`TokenCache`]; injected so expiry is testable.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Vendor access token with a fixed time-to-live.
#[derive(Debug)]
pub struct TokenCache<C: Clock = SystemClock> {
    clock: C,
    ttl: Duration,
    slot: Option<CachedToken>,
}

impl TokenCache<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(SystemClock, ttl)
    }
}

impl<C: Clock> TokenCache<C> {
    pub fn with_clock(clock: C, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            slot: None,
        }
    }

    /// The cached token, unless absent or expired.
    pub fn get(&self) -> Option<&str> {
        let now = self.clock.now();
        self.slot
            .as_ref()
            .filter(|t| now < t.expires_at)
            .map(|t| t.value.as_str())
    }

    pub fn refresh(&mut self, token: impl Into<String>) {
        let expires_at = self.clock.now() + self.ttl;
        self.slot = Some(CachedToken {
            value: token.into(),
            expires_at,
        });
        tracing::debug!(ttl_secs = self.ttl.as_secs(), "vendor token refreshed");
    }

    pub fn expire(&mut self) {
        self.slot = None;
    }

    /// Returns the cached token or stores the one produced by `fetch`.
    pub fn get_or_refresh<E, F>(&mut self, fetch: F) -> Result<String, E>
    where
        F: FnOnce() -> Result<String, E>,
    {
        if let Some(token) = self.get() {
            return Ok(token.to_string());
        }
        let token = fetch()?;
        self.refresh(token.clone());
        Ok(token)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/upstream/token.rs"]
mod tests;
