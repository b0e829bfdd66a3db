//! Selection & quantity state machine plus the pricing engine.
//!
//! This crate contains the order form's business rules, implemented purely as
//! deterministic domain logic (no rendering, no timers, no IO).

pub mod pricing;
pub mod state;

pub use pricing::{DisplayTotals, Totals, compute_totals, shipping_surcharge};
pub use state::{
    BeginSubmit, ChangeQuantity, EndSubmit, QuantityChanged, QuantityStep, SelectVariant,
    SelectionCommand, SelectionError, SelectionEvent, SelectionState, SetShipping,
    ShippingChosen, SubmitEnded, SubmitStarted, VariantSelected,
};
