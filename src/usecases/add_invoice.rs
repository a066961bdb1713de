use std::sync::Arc;

use hourglass_rs::SafeTimeProvider;
use tracing::{info, instrument, warn};

use crate::invoice::{NewSupplierInvoice, SupplierInvoice};
use crate::outcome::{MessageId, OperationResult};
use crate::repository::SupplierInvoiceRepository;

/// outcome of recording a new invoice
#[derive(Debug, Clone, PartialEq)]
pub enum CreatedInvoice {
    Created(SupplierInvoice),
    Failed(MessageId),
}

impl CreatedInvoice {
    pub fn result(&self) -> OperationResult {
        match self {
            CreatedInvoice::Created(_) => OperationResult::Success,
            CreatedInvoice::Failed(id) => OperationResult::Failure(*id),
        }
    }

    pub fn invoice(&self) -> Option<&SupplierInvoice> {
        match self {
            CreatedInvoice::Created(invoice) => Some(invoice),
            CreatedInvoice::Failed(_) => None,
        }
    }

    pub fn into_invoice(self) -> Option<SupplierInvoice> {
        match self {
            CreatedInvoice::Created(invoice) => Some(invoice),
            CreatedInvoice::Failed(_) => None,
        }
    }
}

/// records a new supplier invoice
pub struct AddSupplierInvoiceUseCase {
    repository: Arc<dyn SupplierInvoiceRepository>,
}

impl AddSupplierInvoiceUseCase {
    pub fn new(repository: Arc<dyn SupplierInvoiceRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip_all, fields(supplier_id = %request.supplier_id, invoice_number = %request.invoice_number))]
    pub async fn execute(&self, request: NewSupplierInvoice, time_provider: &SafeTimeProvider) -> CreatedInvoice {
        let invoice = match SupplierInvoice::create(request, time_provider.now()) {
            Ok(invoice) => invoice,
            Err(err) => {
                warn!(error = %err, "invoice refused");
                return CreatedInvoice::Failed(err.message_id());
            }
        };

        match self.repository.add_invoice(invoice.clone()).await {
            Ok(()) => {
                info!(invoice_id = %invoice.invoice_id(), status = %invoice.payment_status(), "invoice recorded");
                CreatedInvoice::Created(invoice)
            }
            Err(err) => {
                warn!(error = %err, "failed to store invoice");
                CreatedInvoice::Failed(err.message_id_or(MessageId::InvoiceSaveFailed))
            }
        }
    }
}
