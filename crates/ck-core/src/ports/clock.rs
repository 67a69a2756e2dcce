/// Wall-clock source for entry timestamps.
pub trait ClockPort: Send + Sync {
    fn now_ms(&self) -> i64;
}
