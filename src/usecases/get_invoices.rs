use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};
use hourglass_rs::SafeTimeProvider;

use crate::invoice::SupplierInvoice;
use crate::repository::{Resource, SupplierInvoiceRepository};

/// streams stored invoices with their status refreshed for the current time
///
/// Status is re-derived against the provider's clock for every snapshot, so an
/// invoice stored as pending shows up as overdue once its due date has passed.
pub struct GetSupplierInvoicesUseCase {
    repository: Arc<dyn SupplierInvoiceRepository>,
}

impl GetSupplierInvoicesUseCase {
    pub fn new(repository: Arc<dyn SupplierInvoiceRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self, time_provider: &SafeTimeProvider) -> BoxStream<'static, Resource<Vec<SupplierInvoice>>> {
        let time_provider = time_provider.clone();
        self.repository
            .get_invoices()
            .map(move |resource| {
                resource.map(|mut invoices| {
                    let now = time_provider.now();
                    for invoice in invoices.iter_mut() {
                        invoice.refresh_status(now);
                    }
                    invoices
                })
            })
            .boxed()
    }

    /// invoices still owed, earliest due date first
    pub fn outstanding(&self, time_provider: &SafeTimeProvider) -> BoxStream<'static, Resource<Vec<SupplierInvoice>>> {
        self.execute(time_provider)
            .map(|resource| {
                resource.map(|invoices| {
                    let mut owed: Vec<SupplierInvoice> = invoices
                        .into_iter()
                        .filter(|invoice| invoice.payment_status().is_outstanding())
                        .collect();
                    owed.sort_by_key(|invoice| invoice.due_date());
                    owed
                })
            })
            .boxed()
    }
}
