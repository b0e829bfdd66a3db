//! Presentation sink that prints to a line-oriented writer.

use std::fmt;
use std::io::Write;

use orderform_catalog::VariantId;
use orderform_contact::{ContactInput, FieldId};
use orderform_form::{Notice, OrderFields, PresentationSink};
use orderform_selection::{DisplayTotals, QuantityStep};

use crate::command::HELP;

pub struct TerminalSink<W: Write> {
    out: W,
    contact: ContactInput,
    countdown: Option<String>,
    back_to_top_visible: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            contact: ContactInput::default(),
            countdown: None,
            back_to_top_visible: false,
        }
    }

    pub fn set_contact_field(&mut self, field: FieldId, text: String) {
        match field {
            FieldId::Name => self.contact.name = text,
            FieldId::Phone => self.contact.phone = text,
            FieldId::Address => self.contact.address = text,
        }
    }

    pub fn print_help(&mut self) {
        self.line(format_args!("{HELP}"));
    }

    pub fn print_countdown(&mut self) {
        if let Some(text) = self.countdown.clone() {
            self.line(format_args!("{text}"));
        }
    }

    pub fn report_error(&mut self, err: &dyn fmt::Display) {
        self.line(format_args!("error: {err}"));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{args}") {
            tracing::warn!(error = %err, "terminal output failed");
        }
    }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    fn read_contact(&self) -> ContactInput {
        self.contact.clone()
    }

    fn set_variant_checked(&mut self, variant: &VariantId, checked: bool) {
        if checked {
            self.line(format_args!("> {variant}"));
        }
    }

    fn set_variant_enabled(&mut self, variant: &VariantId, enabled: bool) {
        if !enabled {
            self.line(format_args!("  {variant}: out of stock"));
        }
    }

    fn set_stepper_visible(&mut self, _variant: &VariantId, _visible: bool) {}

    fn set_stepper_enabled(&mut self, _variant: &VariantId, step: QuantityStep, enabled: bool) {
        if !enabled {
            let label = match step {
                QuantityStep::Decrement => "-",
                QuantityStep::Increment => "+",
            };
            self.line(format_args!("  [{label}] unavailable"));
        }
    }

    fn set_quantity(&mut self, _variant: &VariantId, display: &str) {
        self.line(format_args!("  quantity {display}"));
    }

    fn set_totals(&mut self, totals: &DisplayTotals) {
        self.line(format_args!(
            "  subtotal {}  shipping {}  total {}",
            totals.subtotal, totals.shipping, totals.total
        ));
    }

    fn set_order_fields(&mut self, fields: &OrderFields) {
        tracing::debug!(
            product = %fields.product_name,
            quantity = fields.quantity,
            total = fields.total,
            "order fields updated"
        );
    }

    fn set_field_error(&mut self, field: FieldId, visible: bool) {
        if visible {
            self.line(format_args!("  ! invalid {}", field.as_str()));
        }
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.line(format_args!("! {}", notice.text));
    }

    fn clear_notice(&mut self) {}

    fn set_countdown_text(&mut self, text: &str) {
        // print the first banner only; `time` shows the latest
        if self.countdown.is_none() {
            self.line(format_args!("{text}"));
        }
        self.countdown = Some(text.to_string());
    }

    fn set_back_to_top_visible(&mut self, visible: bool) {
        if visible != self.back_to_top_visible {
            self.back_to_top_visible = visible;
            let state = if visible { "shown" } else { "hidden" };
            self.line(format_args!("  [back to top] {state}"));
        }
    }

    fn scroll_to_top(&mut self) {
        self.line(format_args!("^ top of page"));
    }

    fn submit_order(&mut self, fields: &OrderFields) {
        match serde_json::to_string(fields) {
            Ok(json) => self.line(format_args!("order placed: {json}")),
            Err(err) => tracing::error!(error = %err, "cannot encode order"),
        }
    }
}
