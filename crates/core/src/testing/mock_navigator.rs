//! Mock navigator for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::client::Navigator;

/// Navigator that only counts how often it was asked to navigate.
#[derive(Debug, Default)]
pub struct MockNavigator {
    navigations: AtomicUsize,
}

impl MockNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the landing page was requested.
    pub fn navigation_count(&self) -> usize {
        self.navigations.load(Ordering::SeqCst)
    }
}

impl Navigator for MockNavigator {
    fn navigate_to_landing(&self) {
        self.navigations.fetch_add(1, Ordering::SeqCst);
    }
}
