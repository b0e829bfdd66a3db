//! In-memory presentation sink.
//!
//! Holds the last value written for every field. Useful for headless hosts
//! and for asserting on what a shopper would see.

use std::collections::{BTreeMap, BTreeSet};

use orderform_catalog::VariantId;
use orderform_contact::{ContactInput, FieldId};
use orderform_selection::{DisplayTotals, QuantityStep};

use crate::notice::Notice;
use crate::sink::{OrderFields, PresentationSink};

#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    pub contact: ContactInput,
    pub checked: BTreeMap<VariantId, bool>,
    pub enabled: BTreeMap<VariantId, bool>,
    pub stepper_visible: BTreeMap<VariantId, bool>,
    pub stepper_enabled: BTreeMap<(VariantId, QuantityStep), bool>,
    pub quantity: BTreeMap<VariantId, String>,
    pub totals: Option<DisplayTotals>,
    pub order_fields: Option<OrderFields>,
    pub field_errors: BTreeSet<FieldId>,
    pub notice: Option<Notice>,
    pub countdown: Option<String>,
    pub back_to_top_visible: bool,
    pub scrolled_to_top: usize,
    pub submitted: Vec<OrderFields>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contact(contact: ContactInput) -> Self {
        Self {
            contact,
            ..Self::default()
        }
    }

    /// Variants currently shown as checked.
    pub fn checked_variants(&self) -> Vec<&VariantId> {
        self.checked
            .iter()
            .filter(|(_, checked)| **checked)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn visible_steppers(&self) -> Vec<&VariantId> {
        self.stepper_visible
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn is_stepper_enabled(&self, variant: &VariantId, step: QuantityStep) -> Option<bool> {
        self.stepper_enabled.get(&(variant.clone(), step)).copied()
    }
}

impl PresentationSink for InMemorySink {
    fn read_contact(&self) -> ContactInput {
        self.contact.clone()
    }

    fn set_variant_checked(&mut self, variant: &VariantId, checked: bool) {
        self.checked.insert(variant.clone(), checked);
    }

    fn set_variant_enabled(&mut self, variant: &VariantId, enabled: bool) {
        self.enabled.insert(variant.clone(), enabled);
    }

    fn set_stepper_visible(&mut self, variant: &VariantId, visible: bool) {
        self.stepper_visible.insert(variant.clone(), visible);
    }

    fn set_stepper_enabled(&mut self, variant: &VariantId, step: QuantityStep, enabled: bool) {
        self.stepper_enabled.insert((variant.clone(), step), enabled);
    }

    fn set_quantity(&mut self, variant: &VariantId, display: &str) {
        self.quantity.insert(variant.clone(), display.to_string());
    }

    fn set_totals(&mut self, totals: &DisplayTotals) {
        self.totals = Some(totals.clone());
    }

    fn set_order_fields(&mut self, fields: &OrderFields) {
        self.order_fields = Some(fields.clone());
    }

    fn set_field_error(&mut self, field: FieldId, visible: bool) {
        if visible {
            self.field_errors.insert(field);
        } else {
            self.field_errors.remove(&field);
        }
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.notice = Some(notice.clone());
    }

    fn clear_notice(&mut self) {
        self.notice = None;
    }

    fn set_countdown_text(&mut self, text: &str) {
        self.countdown = Some(text.to_string());
    }

    fn set_back_to_top_visible(&mut self, visible: bool) {
        self.back_to_top_visible = visible;
    }

    fn scroll_to_top(&mut self) {
        self.scrolled_to_top += 1;
    }

    fn submit_order(&mut self, fields: &OrderFields) {
        self.submitted.push(fields.clone());
    }
}
