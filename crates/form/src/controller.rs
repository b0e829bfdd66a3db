//! Order form controller: owns the selection and reflects it into the sink.

use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use orderform_catalog::{CatalogConfig, ShippingMethod, VariantId};
use orderform_contact::{FieldId, ValidationReport, validate};
use orderform_core::{DomainError, DomainResult, Event, SessionId, execute};
use orderform_locale::{Messages, format_number};
use orderform_selection::{
    BeginSubmit, ChangeQuantity, EndSubmit, QuantityStep, SelectVariant, SelectionCommand,
    SelectionError, SelectionEvent, SelectionState, SetShipping, Totals, compute_totals,
};

use crate::controls::{Control, ControlMap, UiEvent};
use crate::notice::{Notice, NoticeKind, NoticePolicy};
use crate::settings::FormSettings;
use crate::sink::{OrderFields, PresentationSink};

/// Result of one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed (or was re-rendered) and the sink is up to date.
    Applied,
    /// Nothing to do: unavailable variant, inactive stepper, unbound control.
    Ignored,
    /// Quantity move refused; a notice is showing.
    QuantityRejected(NoticeKind),
    /// Order handed to the sink for submission.
    Submitted(OrderFields),
    /// Submission blocked; the failing fields are flagged on the sink.
    ValidationFailed(ValidationReport),
}

pub struct OrderFormController<S, K = String> {
    state: SelectionState,
    controls: ControlMap<K>,
    settings: FormSettings,
    messages: Messages,
    sink: S,
    notice_expires_at: Option<DateTime<Utc>>,
}

impl<S: PresentationSink, K: Eq + Hash> OrderFormController<S, K> {
    /// Open the form: disable unavailable variants, select the first
    /// available one and render its totals.
    pub fn new(
        session_id: SessionId,
        catalog: Arc<CatalogConfig>,
        settings: FormSettings,
        controls: ControlMap<K>,
        sink: S,
    ) -> DomainResult<Self> {
        let state = SelectionState::open(session_id, catalog).inspect_err(|err| {
            tracing::error!(session = %session_id, error = %err, "cannot open order form");
        })?;

        let mut controller = Self {
            state,
            controls,
            messages: Messages::for_locale(settings.locale),
            settings,
            sink,
            notice_expires_at: None,
        };
        controller.render_availability();
        controller.render_selection();

        tracing::info!(
            session = %session_id,
            variant = %controller.state.selected(),
            "order form opened"
        );
        Ok(controller)
    }

    pub fn session_id(&self) -> SessionId {
        self.state.session_id()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn totals(&self) -> Totals {
        compute_totals(&self.state)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// When the current transient notice should be cleared, if any.
    pub fn notice_deadline(&self) -> Option<DateTime<Utc>> {
        self.notice_expires_at
    }

    /// Route a host event through the control bindings.
    pub fn handle(&mut self, event: UiEvent<K>, now: DateTime<Utc>) -> DomainResult<Outcome> {
        match event {
            UiEvent::Click(target) => self.activate(&target, now),
            UiEvent::KeyDown { target, key } if key.activates() => self.activate(&target, now),
            UiEvent::KeyDown { .. } => Ok(Outcome::Ignored),
            UiEvent::Scroll { offset_y } => {
                self.on_scroll(offset_y);
                Ok(Outcome::Applied)
            }
            UiEvent::DismissNotice => {
                self.dismiss_notice();
                Ok(Outcome::Applied)
            }
        }
    }

    fn activate(&mut self, target: &K, now: DateTime<Utc>) -> DomainResult<Outcome> {
        let Some(control) = self.controls.resolve(target).cloned() else {
            return Ok(Outcome::Ignored);
        };

        match control {
            Control::Variant(variant) => self.select_variant(&variant, now),
            Control::Stepper(variant, step) => self.change_quantity(&variant, step, now),
            Control::Shipping(method) => self.set_shipping(method, now),
            Control::Submit => self.submit(now),
            Control::BackToTop => {
                self.sink.scroll_to_top();
                Ok(Outcome::Applied)
            }
        }
    }

    pub fn select_variant(
        &mut self,
        variant: &VariantId,
        now: DateTime<Utc>,
    ) -> DomainResult<Outcome> {
        let command = SelectionCommand::SelectVariant(SelectVariant {
            variant: variant.clone(),
            occurred_at: now,
        });

        match self.run(&command) {
            Ok(events) if events.is_empty() => {
                tracing::debug!(
                    session = %self.session_id(),
                    variant = %variant,
                    "unavailable variant ignored"
                );
                Ok(Outcome::Ignored)
            }
            Ok(_) => {
                self.render_selection();
                tracing::info!(
                    session = %self.session_id(),
                    variant = %variant,
                    quantity = self.state.selected_quantity(),
                    "variant selected"
                );
                Ok(Outcome::Applied)
            }
            Err(err) => Err(self.defect(err)),
        }
    }

    pub fn change_quantity(
        &mut self,
        variant: &VariantId,
        step: QuantityStep,
        now: DateTime<Utc>,
    ) -> DomainResult<Outcome> {
        let command = SelectionCommand::ChangeQuantity(ChangeQuantity {
            variant: variant.clone(),
            step,
            occurred_at: now,
        });

        match self.run(&command) {
            Ok(events) if events.is_empty() => Ok(Outcome::Ignored),
            Ok(_) => {
                self.render_quantity();
                self.push_totals();
                Ok(Outcome::Applied)
            }
            Err(SelectionError::BelowMinimum { .. }) => {
                let text = self.messages.quantity_below_min();
                Ok(self.reject(NoticeKind::QuantityBelowMinimum, text, now))
            }
            Err(SelectionError::AboveMaximum { max, .. }) => {
                let text = self.messages.quantity_above_max(max);
                Ok(self.reject(NoticeKind::QuantityAboveMaximum, text, now))
            }
            Err(err) => Err(self.defect(err)),
        }
    }

    pub fn set_shipping(
        &mut self,
        method: ShippingMethod,
        now: DateTime<Utc>,
    ) -> DomainResult<Outcome> {
        let command = SelectionCommand::SetShipping(SetShipping {
            method,
            occurred_at: now,
        });
        self.run(&command).map_err(|err| self.defect(err))?;
        self.push_totals();
        Ok(Outcome::Applied)
    }

    /// Validate contact fields and, when they pass, hand the finalized order
    /// to the sink.
    pub fn submit(&mut self, now: DateTime<Utc>) -> DomainResult<Outcome> {
        for field in FieldId::ALL {
            self.sink.set_field_error(field, false);
        }

        let report = validate(&self.sink.read_contact());
        if !report.is_valid() {
            for field in report.failures() {
                self.sink.set_field_error(field, true);
            }
            tracing::info!(
                session = %self.session_id(),
                failed = ?report.failures().map(FieldId::as_str).collect::<Vec<_>>(),
                "submission blocked by contact validation"
            );
            return Ok(Outcome::ValidationFailed(report));
        }

        // The submit window only spans this call while submission is
        // synchronous; quantity changes can't interleave with it yet.
        let begin = SelectionCommand::BeginSubmit(BeginSubmit { occurred_at: now });
        self.run(&begin).map_err(|err| self.defect(err))?;

        let totals = compute_totals(&self.state);
        let fields = OrderFields::from(&totals);
        self.render_totals(&totals);
        self.sink.submit_order(&fields);

        let end = SelectionCommand::EndSubmit(EndSubmit { occurred_at: now });
        self.run(&end).map_err(|err| self.defect(err))?;

        tracing::info!(
            session = %self.session_id(),
            product = %fields.product_name,
            quantity = fields.quantity,
            total = fields.total,
            "order submitted"
        );
        Ok(Outcome::Submitted(fields))
    }

    pub fn on_scroll(&mut self, offset_y: f64) {
        self.sink
            .set_back_to_top_visible(offset_y > self.settings.back_to_top_threshold_px);
    }

    /// Clear a transient notice whose display time has elapsed.
    pub fn expire_notice(&mut self, now: DateTime<Utc>) -> bool {
        match self.notice_expires_at {
            Some(at) if now >= at => {
                self.dismiss_notice();
                true
            }
            _ => false,
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice_expires_at = None;
        self.sink.clear_notice();
    }

    fn run(&mut self, command: &SelectionCommand) -> Result<Vec<SelectionEvent>, SelectionError> {
        let events = execute(&mut self.state, command)?;
        for event in &events {
            tracing::debug!(
                session = %self.state.session_id(),
                event = event.event_type(),
                "selection event applied"
            );
        }
        Ok(events)
    }

    fn defect(&self, err: SelectionError) -> DomainError {
        let err = match err {
            SelectionError::Domain(err) => err,
            other => DomainError::invariant(other.to_string()),
        };
        tracing::warn!(session = %self.session_id(), error = %err, "rejected form interaction");
        err
    }

    fn reject(&mut self, kind: NoticeKind, text: String, now: DateTime<Utc>) -> Outcome {
        let policy = self.settings.notice_policy;
        self.notice_expires_at = match policy {
            NoticePolicy::Transient { clear_after_ms } => {
                TimeDelta::try_milliseconds(i64::try_from(clear_after_ms).unwrap_or(i64::MAX))
                    .and_then(|delay| now.checked_add_signed(delay))
            }
            NoticePolicy::Blocking => None,
        };

        tracing::info!(
            session = %self.session_id(),
            variant = %self.state.selected(),
            quantity = self.state.selected_quantity(),
            ?kind,
            "quantity change rejected"
        );
        self.sink.show_notice(&Notice { kind, text, policy });
        Outcome::QuantityRejected(kind)
    }

    fn render_availability(&mut self) {
        for variant in self.state.catalog().variants() {
            self.sink.set_variant_enabled(&variant.id, variant.in_stock);
        }
    }

    fn render_selection(&mut self) {
        let selected = self.state.selected();
        for variant in self.state.catalog().variants() {
            let active = &variant.id == selected;
            self.sink.set_variant_checked(&variant.id, active);
            self.sink.set_stepper_visible(&variant.id, active);
        }
        self.render_quantity();
        self.push_totals();
    }

    fn render_quantity(&mut self) {
        let selected = self.state.selected();
        let display = format_number(
            u64::from(self.state.selected_quantity()),
            self.settings.locale,
        );
        self.sink.set_quantity(selected, &display);
        self.sink
            .set_stepper_enabled(selected, QuantityStep::Decrement, self.state.can_decrement());
        self.sink
            .set_stepper_enabled(selected, QuantityStep::Increment, self.state.can_increment());
    }

    fn push_totals(&mut self) {
        let totals = compute_totals(&self.state);
        self.render_totals(&totals);
    }

    fn render_totals(&mut self, totals: &Totals) {
        self.sink.set_totals(&totals.display(self.settings.locale));
        self.sink.set_order_fields(&OrderFields::from(totals));
    }
}
