use std::sync::Arc;

use hourglass_rs::SafeTimeProvider;
use tracing::{info, instrument, warn};

use crate::invoice::{InvoiceUpdate, SupplierInvoice};
use crate::outcome::{MessageId, OperationResult};
use crate::repository::SupplierInvoiceRepository;

/// corrects the header of a recorded invoice and re-derives its status
pub struct UpdateSupplierInvoiceUseCase {
    repository: Arc<dyn SupplierInvoiceRepository>,
}

impl UpdateSupplierInvoiceUseCase {
    pub fn new(repository: Arc<dyn SupplierInvoiceRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip_all, fields(invoice_id = %invoice.invoice_id(), version = invoice.version()))]
    pub async fn execute(
        &self,
        invoice: &mut SupplierInvoice,
        update: InvoiceUpdate,
        time_provider: &SafeTimeProvider,
    ) -> OperationResult {
        let mut updated = match invoice.amended(update, time_provider.now()) {
            Ok(updated) => updated,
            Err(err) => {
                warn!(error = %err, "invoice update refused");
                return OperationResult::Failure(err.message_id());
            }
        };

        match self.repository.update_invoice(updated.clone(), invoice.version()).await {
            Ok(()) => {
                updated.bump_version();
                info!(status = %updated.payment_status(), "invoice updated");
                *invoice = updated;
                OperationResult::Success
            }
            Err(err) => {
                warn!(error = %err, "failed to store invoice update");
                OperationResult::Failure(err.message_id_or(MessageId::InvoiceSaveFailed))
            }
        }
    }
}
