use std::time::Duration;

/// Simulated per-operation latency applied by `InMemoryStore`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    pub get_all: Duration,
    pub get_by_id: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            get_all: Duration::from_millis(300),
            get_by_id: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(350),
            delete: Duration::from_millis(300),
        }
    }
}

impl Latency {
    pub fn none() -> Self {
        Self {
            get_all: Duration::ZERO,
            get_by_id: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }

    /// Default timings multiplied by `factor`. Non-positive or non-finite
    /// factors disable latency entirely; products too large for a
    /// `Duration` saturate at `Duration::MAX`.
    pub fn scaled(factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::none();
        }
        let base = Self::default();
        let scale = |d: Duration| {
            Duration::try_from_secs_f64(d.as_secs_f64() * factor).unwrap_or(Duration::MAX)
        };
        Self {
            get_all: scale(base.get_all),
            get_by_id: scale(base.get_by_id),
            create: scale(base.create),
            update: scale(base.update),
            delete: scale(base.delete),
        }
    }

    pub(crate) async fn pause(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
