use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{InvoiceId, PaymentId, PaymentMethod, PaymentStatus, SupplierId};

/// changes committed to the invoice store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InvoiceEvent {
    InvoiceCreated {
        invoice_id: InvoiceId,
        supplier_id: SupplierId,
        total_amount: Money,
        due_date: DateTime<Utc>,
        status: PaymentStatus,
        timestamp: DateTime<Utc>,
    },
    InvoiceUpdated {
        invoice_id: InvoiceId,
        total_amount: Money,
        due_date: DateTime<Utc>,
        version: u64,
    },
    PaymentRecorded {
        invoice_id: InvoiceId,
        payment_id: PaymentId,
        amount: Money,
        method: PaymentMethod,
        payment_date: DateTime<Utc>,
        version: u64,
    },
    StatusChanged {
        invoice_id: InvoiceId,
        old_status: PaymentStatus,
        new_status: PaymentStatus,
        version: u64,
    },
}

impl InvoiceEvent {
    pub fn invoice_id(&self) -> InvoiceId {
        match self {
            InvoiceEvent::InvoiceCreated { invoice_id, .. }
            | InvoiceEvent::InvoiceUpdated { invoice_id, .. }
            | InvoiceEvent::PaymentRecorded { invoice_id, .. }
            | InvoiceEvent::StatusChanged { invoice_id, .. } => *invoice_id,
        }
    }
}

/// event store for collecting events as changes are committed
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<InvoiceEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: InvoiceEvent) {
        self.events.push(event);
    }

    /// emit a status change only when the status actually moved
    pub fn emit_status_change(
        &mut self,
        invoice_id: InvoiceId,
        old_status: PaymentStatus,
        new_status: PaymentStatus,
        version: u64,
    ) {
        if old_status != new_status {
            self.emit(InvoiceEvent::StatusChanged {
                invoice_id,
                old_status,
                new_status,
                version,
            });
        }
    }

    pub fn take_events(&mut self) -> Vec<InvoiceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[InvoiceEvent] {
        &self.events
    }
}
