use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "is training" flag.
///
/// `Network::train` raises it on entry and the loop reads it after every
/// example. Any clone may lower it from another thread; the loop notices at
/// its next check point and never mid-update.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    training: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.training.store(false, Ordering::Release);
    }

    pub fn is_training(&self) -> bool {
        self.training.load(Ordering::Acquire)
    }

    pub(crate) fn start(&self) {
        self.training.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let handle = token.clone();
        token.start();
        assert!(handle.is_training());
        handle.cancel();
        assert!(!token.is_training());
    }

    #[test]
    fn cancel_from_another_thread() {
        let token = CancellationToken::new();
        token.start();
        let handle = token.clone();
        std::thread::spawn(move || handle.cancel()).join().unwrap();
        assert!(!token.is_training());
    }
}
