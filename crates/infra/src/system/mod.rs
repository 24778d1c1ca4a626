use chrono::{DateTime, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Pins the clock to a fixed instant
pub struct StaticTimeSys {
    pub now: DateTime<Utc>,
}
impl ISys for StaticTimeSys {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
