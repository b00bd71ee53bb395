use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Flag raised by a store listener and drained by the publisher's poll.
///
/// Store listeners must be `Send`, so they cannot hold the publisher itself;
/// they only flip this shared flag.
#[derive(Clone, Debug, Default)]
pub struct ChangeSignal {
    raised: Arc<AtomicBool>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Clear the flag, reporting whether it was set.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_drains_the_flag() {
        let signal = ChangeSignal::new();
        let listener_side = signal.clone();
        assert!(!signal.take());

        listener_side.raise();
        listener_side.raise();
        assert!(signal.is_raised());
        assert!(signal.take());
        assert!(!signal.take());
    }
}
