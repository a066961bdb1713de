use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::{watch, RwLock};
use tokio_stream::wrappers::WatchStream;
use tracing::{info, instrument, warn};

use crate::errors::{InvoiceError, Result};
use crate::events::{EventStore, InvoiceEvent};
use crate::invoice::SupplierInvoice;
use crate::outcome::MessageId;
use crate::payment::PaymentDetails;
use crate::repository::{Resource, SupplierInvoiceRepository};
use crate::types::{InvoiceId, PaymentStatus};

/// the event log is unbounded until drained with `take_events`
#[derive(Debug, Default)]
struct StoreState {
    invoices: HashMap<InvoiceId, SupplierInvoice>,
    events: EventStore,
}

/// invoice store kept in process memory
///
/// Writes take the lock for the whole check-and-apply, so a version check and
/// the change it guards can't interleave with another writer. Subscribers get a
/// fresh snapshot after every commit. Committed events accumulate in memory
/// until a consumer drains them with [`take_events`](Self::take_events).
pub struct InMemorySupplierInvoiceRepository {
    state: RwLock<StoreState>,
    snapshots: watch::Sender<Vec<SupplierInvoice>>,
    unavailable: AtomicBool,
}

impl Default for InMemorySupplierInvoiceRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySupplierInvoiceRepository {
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(Vec::new());
        Self {
            state: RwLock::new(StoreState::default()),
            snapshots,
            unavailable: AtomicBool::new(false),
        }
    }

    /// make every subsequent call fail as if the backing store were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// events committed so far
    pub async fn events(&self) -> Vec<InvoiceEvent> {
        self.state.read().await.events.events().to_vec()
    }

    /// drain committed events
    pub async fn take_events(&self) -> Vec<InvoiceEvent> {
        self.state.write().await.events.take_events()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.invoices.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(InvoiceError::Persistence {
                message: "invoice store unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn publish(&self, state: &StoreState) {
        let mut all: Vec<SupplierInvoice> = state.invoices.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.invoice_id().cmp(&b.invoice_id()))
        });
        self.snapshots.send_replace(all);
    }
}

fn check_version(stored: &SupplierInvoice, expected_version: u64) -> Result<()> {
    if stored.version() != expected_version {
        return Err(InvoiceError::VersionConflict {
            invoice_id: stored.invoice_id(),
            expected: expected_version,
            found: stored.version(),
        });
    }
    Ok(())
}

#[async_trait]
impl SupplierInvoiceRepository for InMemorySupplierInvoiceRepository {
    fn get_invoices(&self) -> BoxStream<'static, Resource<Vec<SupplierInvoice>>> {
        if self.ensure_available().is_err() {
            return stream::iter(vec![Resource::Loading, Resource::Error(MessageId::GenericError)]).boxed();
        }

        let updates = WatchStream::new(self.snapshots.subscribe()).map(Resource::Success);
        stream::once(async { Resource::Loading }).chain(updates).boxed()
    }

    async fn get_invoice(&self, invoice_id: InvoiceId) -> Result<SupplierInvoice> {
        self.ensure_available()?;
        self.state
            .read()
            .await
            .invoices
            .get(&invoice_id)
            .cloned()
            .ok_or(InvoiceError::InvoiceNotFound { invoice_id })
    }

    #[instrument(skip_all, fields(invoice_id = %invoice.invoice_id()))]
    async fn add_invoice(&self, invoice: SupplierInvoice) -> Result<()> {
        self.ensure_available()?;
        let mut state = self.state.write().await;
        let invoice_id = invoice.invoice_id();
        if state.invoices.contains_key(&invoice_id) {
            warn!("invoice already stored");
            return Err(InvoiceError::DuplicateInvoice { invoice_id });
        }

        state.events.emit(InvoiceEvent::InvoiceCreated {
            invoice_id,
            supplier_id: invoice.supplier_id(),
            total_amount: invoice.total_amount(),
            due_date: invoice.due_date(),
            status: invoice.payment_status(),
            timestamp: invoice.created_at(),
        });
        state.invoices.insert(invoice_id, invoice);
        self.publish(&state);

        info!("invoice stored");
        Ok(())
    }

    #[instrument(skip_all, fields(invoice_id = %invoice.invoice_id(), expected_version = expected_version))]
    async fn update_invoice(&self, mut invoice: SupplierInvoice, expected_version: u64) -> Result<()> {
        self.ensure_available()?;
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let invoice_id = invoice.invoice_id();

        let stored = state
            .invoices
            .get_mut(&invoice_id)
            .ok_or(InvoiceError::InvoiceNotFound { invoice_id })?;
        check_version(stored, expected_version)?;

        let old_status = stored.payment_status();
        invoice.version = expected_version + 1;
        *stored = invoice;

        state.events.emit(InvoiceEvent::InvoiceUpdated {
            invoice_id,
            total_amount: stored.total_amount(),
            due_date: stored.due_date(),
            version: stored.version(),
        });
        state
            .events
            .emit_status_change(invoice_id, old_status, stored.payment_status(), stored.version());
        self.publish(state);

        info!("invoice updated");
        Ok(())
    }

    #[instrument(
        skip_all,
        fields(invoice_id = %invoice_id, payment_status = %payment_status, expected_version = expected_version)
    )]
    async fn add_payment_details(
        &self,
        invoice_id: InvoiceId,
        payment_details: PaymentDetails,
        payment_status: PaymentStatus,
        expected_version: u64,
    ) -> Result<()> {
        self.ensure_available()?;
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let stored = state
            .invoices
            .get_mut(&invoice_id)
            .ok_or(InvoiceError::InvoiceNotFound { invoice_id })?;
        check_version(stored, expected_version)?;

        let old_status = stored.payment_status();
        state.events.emit(InvoiceEvent::PaymentRecorded {
            invoice_id,
            payment_id: payment_details.payment_id(),
            amount: payment_details.amount_paid(),
            method: payment_details.payment_method(),
            payment_date: payment_details.payment_date(),
            version: expected_version + 1,
        });
        stored.apply_payment(payment_details, payment_status);
        state
            .events
            .emit_status_change(invoice_id, old_status, payment_status, stored.version());
        self.publish(state);

        info!("payment stored");
        Ok(())
    }
}
