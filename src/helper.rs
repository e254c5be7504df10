use std::time::Instant;

/// Duration between `start` and `end` in seconds
#[allow(clippy::cast_precision_loss)]
pub fn duration_in_seconds(start: Instant, end: Instant) -> f64 {
    (end - start).as_micros() as f64 / 1e6
}

/// Rate per second; zero for an empty duration
#[allow(clippy::cast_precision_loss)]
pub fn per_second(count: usize, seconds: f64) -> f64 {
    if seconds > 0.0 {
        count as f64 / seconds
    } else {
        0.0
    }
}
