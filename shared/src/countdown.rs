/// Per-question countdown, advanced by an external one-second tick.
///
/// The countdown owns no timer of its own: whoever drives the preview calls
/// [`Countdown::tick`] once per elapsed second and the countdown decides
/// whether that tick counts. Suspending keeps the remaining seconds so the
/// countdown can be resumed later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
    running: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a fresh budget and starts counting
    pub fn restart(&mut self, seconds: u64) {
        self.remaining = seconds;
        self.running = true;
    }

    pub fn suspend(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Stops counting and clears the budget
    pub fn stop(&mut self) {
        self.running = false;
        self.remaining = 0;
    }

    /// Consumes one second. Returns false when the tick was ignored.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
