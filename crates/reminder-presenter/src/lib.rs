//! The presenter coordinator (component D) and the cross-thread handoff
//! it receives dispatches through. The overlay window itself is an
//! external collaborator reached only through [`PresenterSink`].

mod coordinator;
mod dispatch;
mod sink;

pub use coordinator::{Presenter, QUEUE_ADVANCE_DELAY};
pub use dispatch::{channel, DispatchReceiver, DispatchSender};
pub use sink::PresenterSink;
