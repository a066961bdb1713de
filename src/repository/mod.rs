pub mod memory;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::errors::Result;
use crate::outcome::MessageId;
use crate::payment::PaymentDetails;
use crate::types::{InvoiceId, PaymentStatus};
use crate::invoice::SupplierInvoice;

pub use memory::InMemorySupplierInvoiceRepository;

/// state of a value loaded from a reactive source
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Loading,
    Success(T),
    Error(MessageId),
}

impl<T> Resource<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resource<U> {
        match self {
            Resource::Loading => Resource::Loading,
            Resource::Success(value) => Resource::Success(f(value)),
            Resource::Error(id) => Resource::Error(id),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// storage for supplier invoices
///
/// Every write carries the version the caller last saw. Implementations must
/// reject the write with `InvoiceError::VersionConflict` when the stored version
/// differs, and must apply a payment, its status and the version bump as one
/// unit.
#[async_trait]
pub trait SupplierInvoiceRepository: Send + Sync {
    /// stream of every invoice, re-emitted on each committed change
    fn get_invoices(&self) -> BoxStream<'static, Resource<Vec<SupplierInvoice>>>;

    async fn get_invoice(&self, invoice_id: InvoiceId) -> Result<SupplierInvoice>;

    async fn add_invoice(&self, invoice: SupplierInvoice) -> Result<()>;

    async fn update_invoice(&self, invoice: SupplierInvoice, expected_version: u64) -> Result<()>;

    async fn add_payment_details(
        &self,
        invoice_id: InvoiceId,
        payment_details: PaymentDetails,
        payment_status: PaymentStatus,
        expected_version: u64,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_map_keeps_state() {
        let loaded: Resource<Vec<u32>> = Resource::Success(vec![1, 2, 3]);
        assert_eq!(loaded.map(|v| v.len()), Resource::Success(3));

        let failed: Resource<Vec<u32>> = Resource::Error(MessageId::GenericError);
        assert_eq!(failed.clone().map(|v| v.len()), Resource::Error(MessageId::GenericError));
        assert!(failed.data().is_none());
        assert!(Resource::<u8>::Loading.data().is_none());
    }
}
