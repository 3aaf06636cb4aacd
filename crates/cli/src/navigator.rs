use tokio::sync::Notify;
use tracing::info;

use queuewatch_core::Navigator;

/// Sends the user back to the landing page by printing its URL and ending
/// the session loop.
pub struct LandingNavigator {
    landing_url: String,
    left: Notify,
}

impl LandingNavigator {
    pub fn new(landing_url: impl Into<String>) -> Self {
        Self {
            landing_url: landing_url.into(),
            left: Notify::new(),
        }
    }

    /// Resolves once navigation to the landing page has been requested.
    pub async fn left(&self) {
        self.left.notified().await;
    }
}

impl Navigator for LandingNavigator {
    fn navigate_to_landing(&self) {
        info!(landing_url = %self.landing_url, "Navigating to landing page");
        println!("You have left the queue. Join again at {}", self.landing_url);
        self.left.notify_one();
    }
}
