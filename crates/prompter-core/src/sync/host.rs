use super::snapshot::DisplayCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryStatus {
    Created,
    /// Already open; it was asked to come to the front instead.
    Focused,
}

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("No window host is available for the external display")]
    Unavailable,

    #[error("Failed to start external display: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("External display is closed")]
    Closed,

    #[error("Failed to encode display command: {0}")]
    Encode(#[from] super::snapshot::SnapshotError),
}

/// Whatever owns the external display window.
pub trait WindowHost {
    fn create_secondary(&mut self) -> Result<SecondaryStatus, HostError>;

    fn close_secondary(&mut self);

    fn send_to_secondary(&mut self, command: &DisplayCommand) -> Result<(), HostError>;

    /// True once if the window went away on its own since the last poll.
    fn poll_closed(&mut self) -> bool;

    fn is_open(&self) -> bool;
}

impl<H: WindowHost + ?Sized> WindowHost for Box<H> {
    fn create_secondary(&mut self) -> Result<SecondaryStatus, HostError> {
        (**self).create_secondary()
    }

    fn close_secondary(&mut self) {
        (**self).close_secondary()
    }

    fn send_to_secondary(&mut self, command: &DisplayCommand) -> Result<(), HostError> {
        (**self).send_to_secondary(command)
    }

    fn poll_closed(&mut self) -> bool {
        (**self).poll_closed()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}

/// Host used when no external display can be driven.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl WindowHost for DetachedHost {
    fn create_secondary(&mut self) -> Result<SecondaryStatus, HostError> {
        Err(HostError::Unavailable)
    }

    fn close_secondary(&mut self) {}

    fn send_to_secondary(&mut self, _command: &DisplayCommand) -> Result<(), HostError> {
        Err(HostError::Unavailable)
    }

    fn poll_closed(&mut self) -> bool {
        false
    }

    fn is_open(&self) -> bool {
        false
    }
}
