use serde::{Deserialize, Serialize};

use orderform_catalog::VariantId;
use orderform_contact::{ContactInput, FieldId};
use orderform_selection::{DisplayTotals, QuantityStep, Totals};

use crate::notice::Notice;

/// Raw values mirrored into the form fields that get posted to the order
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFields {
    pub product_name: String,
    pub quantity: u32,
    pub subtotal: u64,
    pub total: u64,
}

impl From<&Totals> for OrderFields {
    fn from(totals: &Totals) -> Self {
        Self {
            product_name: totals.product_name.clone(),
            quantity: totals.quantity,
            subtotal: totals.subtotal,
            total: totals.total,
        }
    }
}

/// The rendering surface the controller writes into and reads contact text from.
///
/// The controller never reads visual state back; its own state is the source
/// of truth.
pub trait PresentationSink {
    /// Current raw text of the three contact fields.
    fn read_contact(&self) -> ContactInput;

    /// Checked/highlighted flag of a variant card.
    fn set_variant_checked(&mut self, variant: &VariantId, checked: bool);

    /// Disabled (greyed out) flag of an unavailable variant.
    fn set_variant_enabled(&mut self, variant: &VariantId, enabled: bool);

    fn set_stepper_visible(&mut self, variant: &VariantId, visible: bool);

    fn set_stepper_enabled(&mut self, variant: &VariantId, step: QuantityStep, enabled: bool);

    /// Displayed quantity (already localized).
    fn set_quantity(&mut self, variant: &VariantId, display: &str);

    fn set_totals(&mut self, totals: &DisplayTotals);

    fn set_order_fields(&mut self, fields: &OrderFields);

    fn set_field_error(&mut self, field: FieldId, visible: bool);

    fn show_notice(&mut self, notice: &Notice);

    fn clear_notice(&mut self);

    fn set_countdown_text(&mut self, text: &str);

    fn set_back_to_top_visible(&mut self, visible: bool);

    fn scroll_to_top(&mut self);

    /// Hand the finalized order to the native form submission.
    fn submit_order(&mut self, fields: &OrderFields);
}
