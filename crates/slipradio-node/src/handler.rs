//! Command handler chain.

use crate::platform::FrameSink;

/// Result of offering a frame to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The frame was consumed.
    Handled,
    /// The frame was not recognised.
    Unhandled,
}

impl Dispatch {
    /// Whether the frame was consumed.
    pub fn is_handled(self) -> bool {
        self == Dispatch::Handled
    }
}

/// Extra command handler consulted for frames the node itself does not
/// recognise. Handlers run in registration order; the first one to return
/// [`Dispatch::Handled`] wins.
pub trait CommandHandler: Send {
    /// Offer `frame` to this handler. Replies go out through `sink`.
    fn handle(&mut self, frame: &[u8], sink: &mut dyn FrameSink) -> Dispatch;
}

impl<F> CommandHandler for F
where
    F: FnMut(&[u8], &mut dyn FrameSink) -> Dispatch + Send,
{
    fn handle(&mut self, frame: &[u8], sink: &mut dyn FrameSink) -> Dispatch {
        self(frame, sink)
    }
}
