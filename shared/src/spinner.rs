use std::sync::atomic::{AtomicU64, Ordering};

/// Generation counter behind the loading spinner's failsafe timer.
///
/// Every `arm` hands out a new ticket. Only the newest ticket may fire, so a
/// timer armed by an earlier show cannot hide the spinner for a later one.
#[derive(Debug, Default)]
pub struct Failsafe {
    generation: AtomicU64,
}

impl Failsafe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Whether the timer holding `ticket` should still hide the spinner.
    pub fn should_fire(&self, ticket: u64, visible: bool) -> bool {
        visible && self.generation.load(Ordering::Relaxed) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_show_owns_the_failsafe() {
        let failsafe = Failsafe::new();
        let first = failsafe.arm();
        let second = failsafe.arm();
        assert!(!failsafe.should_fire(first, true));
        assert!(failsafe.should_fire(second, true));
    }

    #[test]
    fn hidden_spinner_is_left_alone() {
        let failsafe = Failsafe::new();
        let ticket = failsafe.arm();
        assert!(!failsafe.should_fire(ticket, false));
    }
}
