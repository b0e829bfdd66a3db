//! Offer countdown banner.
//!
//! Independent of the order form's state: it only knows a deadline, a clock
//! and somewhere to put the rendered text.

pub mod clock;
pub mod deadline;
pub mod emitter;
pub mod remaining;

pub use clock::{Clock, SystemClock};
pub use deadline::{CountdownSettings, Deadline, ExpiryPolicy};
pub use emitter::{CountdownEmitter, CountdownError, CountdownSink, Tick};
pub use remaining::{Remaining, render};
