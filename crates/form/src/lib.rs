//! `orderform-form` — the order form controller.
//!
//! The controller owns the selection state and pushes every change into an
//! injected [`PresentationSink`]. Hosts translate their UI events into
//! [`UiEvent`]s keyed by whatever handle type they use for controls.

pub mod controller;
pub mod controls;
pub mod memory;
pub mod notice;
pub mod settings;
pub mod sink;

pub use controller::{OrderFormController, Outcome};
pub use controls::{Control, ControlMap, Key, UiEvent};
pub use memory::InMemorySink;
pub use notice::{Notice, NoticeKind, NoticePolicy};
pub use settings::FormSettings;
pub use sink::{OrderFields, PresentationSink};
