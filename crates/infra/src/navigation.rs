//! Navigator that hands redirects to the host over a channel
//!
//! The session machine only decides where the user agent goes next. Hosts
//! (a CLI, a webview shell) drain the receiving end and perform the redirect.

use oidc_session_core::{Navigation, Navigator};
use oidc_session_domain::{Result, SessionError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// [`Navigator`] backed by an unbounded tokio channel
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    sender: UnboundedSender<Navigation>,
}

impl ChannelNavigator {
    /// Create a navigator and the receiver the host drains.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<Navigation>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, navigation: Navigation) -> Result<()> {
        debug!(target_url = %navigation.target(), "Queueing navigation");
        self.sender
            .send(navigation)
            .map_err(|_| SessionError::Transport("navigation receiver closed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_in_order() {
        let (navigator, mut receiver) = ChannelNavigator::channel();

        navigator.navigate(Navigation::External("https://auth.example/logout".into())).unwrap();
        navigator.navigate(Navigation::Internal("/".into())).unwrap();

        assert_eq!(
            receiver.try_recv().unwrap(),
            Navigation::External("https://auth.example/logout".into())
        );
        assert_eq!(receiver.try_recv().unwrap(), Navigation::Internal("/".into()));
    }

    #[test]
    fn closed_receiver_is_an_error() {
        let (navigator, receiver) = ChannelNavigator::channel();
        drop(receiver);

        let result = navigator.navigate(Navigation::Internal("/".into()));
        assert!(matches!(result, Err(SessionError::Transport(_))));
    }
}
