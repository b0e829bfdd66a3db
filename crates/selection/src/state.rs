use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use orderform_catalog::{CatalogConfig, ShippingMethod, StockTable, VariantId};
use orderform_core::{Aggregate, AggregateRoot, DomainError, Event, SessionId};

/// One press of a quantity stepper button.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityStep {
    Decrement,
    Increment,
}

impl QuantityStep {
    pub fn delta(self) -> i64 {
        match self {
            QuantityStep::Decrement => -1,
            QuantityStep::Increment => 1,
        }
    }
}

/// Why a command was refused.
///
/// The quantity limits are expected shopper mistakes and are reported back as
/// notices; `Domain` wraps wiring defects (unknown ids and the like).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("quantity of `{variant}` cannot go below 1")]
    BelowMinimum { variant: VariantId },

    #[error("quantity of `{variant}` cannot exceed {max}")]
    AboveMaximum { variant: VariantId, max: u32 },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Aggregate root: the shopper's current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    session_id: SessionId,
    catalog: Arc<CatalogConfig>,
    stock: StockTable,
    selected: VariantId,
    quantities: BTreeMap<VariantId, u32>,
    shipping: Option<ShippingMethod>,
    is_submitting: bool,
    version: u64,
}

impl SelectionState {
    /// Open a selection for a new visit.
    ///
    /// Every variant starts at quantity 1 and the first in-stock variant (in
    /// catalog order) is selected.
    pub fn open(session_id: SessionId, catalog: Arc<CatalogConfig>) -> Result<Self, DomainError> {
        let stock = catalog.stock_table();
        let selected = stock
            .first_available()
            .cloned()
            .ok_or_else(|| DomainError::invariant("no variant is in stock"))?;
        let quantities = catalog
            .variants()
            .iter()
            .map(|v| (v.id.clone(), 1))
            .collect();

        Ok(Self {
            session_id,
            catalog,
            stock,
            selected,
            quantities,
            shipping: None,
            is_submitting: false,
            version: 0,
        })
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    pub fn stock(&self) -> &StockTable {
        &self.stock
    }

    pub fn selected(&self) -> &VariantId {
        &self.selected
    }

    pub fn quantity(&self, variant: &VariantId) -> Option<u32> {
        self.quantities.get(variant).copied()
    }

    pub fn selected_quantity(&self) -> u32 {
        self.quantity(&self.selected).unwrap_or(1)
    }

    pub fn quantities(&self) -> impl Iterator<Item = (&VariantId, u32)> {
        self.quantities.iter().map(|(id, q)| (id, *q))
    }

    pub fn shipping(&self) -> Option<&ShippingMethod> {
        self.shipping.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_selected(&self, variant: &VariantId) -> bool {
        &self.selected == variant
    }

    /// Decrement is offered unless the selected quantity is already 1.
    pub fn can_decrement(&self) -> bool {
        self.selected_quantity() > 1
    }

    pub fn can_increment(&self) -> bool {
        self.selected_quantity() < self.catalog.max_quantity()
    }
}

impl AggregateRoot for SelectionState {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.session_id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: SelectVariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectVariant {
    pub variant: VariantId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ChangeQuantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeQuantity {
    pub variant: VariantId,
    pub step: QuantityStep,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetShipping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetShipping {
    pub method: ShippingMethod,
    pub occurred_at: DateTime<Utc>,
}

/// Command: BeginSubmit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeginSubmit {
    pub occurred_at: DateTime<Utc>,
}

/// Command: EndSubmit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndSubmit {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionCommand {
    SelectVariant(SelectVariant),
    ChangeQuantity(ChangeQuantity),
    SetShipping(SetShipping),
    BeginSubmit(BeginSubmit),
    EndSubmit(EndSubmit),
}

/// Event: VariantSelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSelected {
    pub variant: VariantId,
    pub previous: VariantId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChanged {
    pub variant: VariantId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ShippingChosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingChosen {
    pub method: ShippingMethod,
    pub surcharge: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SubmitStarted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitStarted {
    pub occurred_at: DateTime<Utc>,
}

/// Event: SubmitEnded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitEnded {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEvent {
    VariantSelected(VariantSelected),
    QuantityChanged(QuantityChanged),
    ShippingChosen(ShippingChosen),
    SubmitStarted(SubmitStarted),
    SubmitEnded(SubmitEnded),
}

impl Event for SelectionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SelectionEvent::VariantSelected(_) => "selection.variant_selected",
            SelectionEvent::QuantityChanged(_) => "selection.quantity_changed",
            SelectionEvent::ShippingChosen(_) => "selection.shipping_chosen",
            SelectionEvent::SubmitStarted(_) => "selection.submit_started",
            SelectionEvent::SubmitEnded(_) => "selection.submit_ended",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SelectionEvent::VariantSelected(e) => e.occurred_at,
            SelectionEvent::QuantityChanged(e) => e.occurred_at,
            SelectionEvent::ShippingChosen(e) => e.occurred_at,
            SelectionEvent::SubmitStarted(e) => e.occurred_at,
            SelectionEvent::SubmitEnded(e) => e.occurred_at,
        }
    }
}

impl Aggregate for SelectionState {
    type Command = SelectionCommand;
    type Event = SelectionEvent;
    type Error = SelectionError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SelectionEvent::VariantSelected(e) => {
                self.selected = e.variant.clone();
            }
            SelectionEvent::QuantityChanged(e) => {
                self.quantities.insert(e.variant.clone(), e.quantity);
            }
            SelectionEvent::ShippingChosen(e) => {
                self.shipping = Some(e.method.clone());
            }
            SelectionEvent::SubmitStarted(_) => {
                self.is_submitting = true;
            }
            SelectionEvent::SubmitEnded(_) => {
                self.is_submitting = false;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SelectionCommand::SelectVariant(cmd) => self.handle_select(cmd),
            SelectionCommand::ChangeQuantity(cmd) => self.handle_change_quantity(cmd),
            SelectionCommand::SetShipping(cmd) => self.handle_set_shipping(cmd),
            SelectionCommand::BeginSubmit(cmd) => self.handle_begin_submit(cmd),
            SelectionCommand::EndSubmit(cmd) => self.handle_end_submit(cmd),
        }
    }
}

impl SelectionState {
    fn ensure_known(&self, variant: &VariantId) -> Result<(), SelectionError> {
        if !self.stock.contains(variant) {
            return Err(DomainError::not_found(format!("variant `{variant}`")).into());
        }
        Ok(())
    }

    fn handle_select(&self, cmd: &SelectVariant) -> Result<Vec<SelectionEvent>, SelectionError> {
        self.ensure_known(&cmd.variant)?;

        // Unavailable variants are never selectable; the attempt is ignored.
        if !self.stock.is_available(&cmd.variant) {
            return Ok(Vec::new());
        }

        Ok(vec![SelectionEvent::VariantSelected(VariantSelected {
            variant: cmd.variant.clone(),
            previous: self.selected.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_change_quantity(
        &self,
        cmd: &ChangeQuantity,
    ) -> Result<Vec<SelectionEvent>, SelectionError> {
        self.ensure_known(&cmd.variant)?;

        if cmd.variant != self.selected || self.is_submitting {
            return Ok(Vec::new());
        }

        let current = i64::from(self.selected_quantity());
        let max = self.catalog.max_quantity();
        let next = current + cmd.step.delta();

        if next < 1 {
            return Err(SelectionError::BelowMinimum {
                variant: cmd.variant.clone(),
            });
        }
        if next > i64::from(max) {
            return Err(SelectionError::AboveMaximum {
                variant: cmd.variant.clone(),
                max,
            });
        }

        let quantity = u32::try_from(next)
            .map_err(|_| DomainError::invariant("quantity out of representable range"))?;

        Ok(vec![SelectionEvent::QuantityChanged(QuantityChanged {
            variant: cmd.variant.clone(),
            quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_shipping(
        &self,
        cmd: &SetShipping,
    ) -> Result<Vec<SelectionEvent>, SelectionError> {
        let table = self
            .catalog
            .shipping()
            .ok_or_else(|| DomainError::invariant("this catalog offers no shipping options"))?;
        let surcharge = table
            .surcharge(&cmd.method)
            .ok_or_else(|| DomainError::not_found(format!("shipping method `{}`", cmd.method)))?;

        Ok(vec![SelectionEvent::ShippingChosen(ShippingChosen {
            method: cmd.method.clone(),
            surcharge,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_begin_submit(
        &self,
        cmd: &BeginSubmit,
    ) -> Result<Vec<SelectionEvent>, SelectionError> {
        if self.is_submitting {
            return Err(DomainError::conflict("a submission is already in progress").into());
        }
        Ok(vec![SelectionEvent::SubmitStarted(SubmitStarted {
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_end_submit(&self, cmd: &EndSubmit) -> Result<Vec<SelectionEvent>, SelectionError> {
        if !self.is_submitting {
            return Ok(Vec::new());
        }
        Ok(vec![SelectionEvent::SubmitEnded(SubmitEnded {
            occurred_at: cmd.occurred_at,
        })])
    }
}
