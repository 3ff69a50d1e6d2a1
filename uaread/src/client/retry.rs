use std::time::Duration;

/// Trait that controls how long the reader pauses before retrying a failed
/// read attempt
pub trait RetryStrategy: Send {
    /// Reset internal state. Called at the start of every read call
    fn reset(&mut self);
    /// Return the next delay before making another read attempt
    fn next_delay(&mut self) -> Duration;
}

/// Return the default [`RetryStrategy`]: a fixed one second pause
pub fn default_retry_strategy() -> Box<dyn RetryStrategy> {
    fixed_retry_strategy(Duration::from_secs(1))
}

/// Return a [`RetryStrategy`] that always waits the same amount of time
pub fn fixed_retry_strategy(delay: Duration) -> Box<dyn RetryStrategy> {
    Box::new(Fixed { delay })
}

/// Return a [`RetryStrategy`] that doubles on each attempt up to a maximum value
pub fn doubling_retry_strategy(min: Duration, max: Duration) -> Box<dyn RetryStrategy> {
    Doubling::create(min, max)
}

struct Fixed {
    delay: Duration,
}

impl RetryStrategy for Fixed {
    fn reset(&mut self) {}

    fn next_delay(&mut self) -> Duration {
        self.delay
    }
}

struct Doubling {
    min: Duration,
    max: Duration,
    current: Duration,
}

impl Doubling {
    fn create(min: Duration, max: Duration) -> Box<dyn RetryStrategy> {
        Box::new(Doubling {
            min,
            max,
            current: min,
        })
    }
}

impl RetryStrategy for Doubling {
    fn reset(&mut self) {
        self.current = self.min;
    }

    fn next_delay(&mut self) -> Duration {
        let ret = self.current;
        self.current = std::cmp::min(2 * self.current, self.max);
        ret
    }
}
