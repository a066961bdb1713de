use std::sync::Arc;

use hourglass_rs::SafeTimeProvider;
use tracing::{info, instrument, warn};

use crate::config::LedgerConfig;
use crate::errors::{InvoiceError, Result};
use crate::invoice::SupplierInvoice;
use crate::outcome::{MessageId, OperationResult};
use crate::payment::PaymentDetails;
use crate::repository::SupplierInvoiceRepository;

/// records a payment against a supplier invoice
///
/// The payment is appended, the status re-derived and the change persisted as
/// one unit. The caller's invoice only changes once the repository accepted the
/// write; a failed or cancelled call leaves it as it was. Nothing is retried.
pub struct AddPaymentDetailsUseCase {
    repository: Arc<dyn SupplierInvoiceRepository>,
    config: LedgerConfig,
}

impl AddPaymentDetailsUseCase {
    pub fn new(repository: Arc<dyn SupplierInvoiceRepository>) -> Self {
        Self::with_config(repository, LedgerConfig::default())
    }

    pub fn with_config(repository: Arc<dyn SupplierInvoiceRepository>, config: LedgerConfig) -> Self {
        Self { repository, config }
    }

    #[instrument(
        skip_all,
        fields(
            invoice_id = %invoice.invoice_id(),
            payment_id = %payment_details.payment_id(),
            amount = %payment_details.amount_paid()
        )
    )]
    pub async fn execute(
        &self,
        invoice: &mut SupplierInvoice,
        payment_details: PaymentDetails,
        time_provider: &SafeTimeProvider,
    ) -> OperationResult {
        if let Err(err) = self.check_policies(invoice, &payment_details) {
            warn!(error = %err, "payment refused");
            return OperationResult::Failure(err.message_id());
        }

        let now = time_provider.now();
        let mut updated = invoice.with_payment(payment_details.clone(), now);
        let status = updated.payment_status();

        let stored = self
            .repository
            .add_payment_details(invoice.invoice_id(), payment_details, status, invoice.version())
            .await;

        match stored {
            Ok(()) => {
                updated.bump_version();
                info!(
                    status = %status,
                    total_paid = %updated.total_paid(),
                    rest_due = %updated.rest_due_amount(),
                    "payment recorded"
                );
                *invoice = updated;
                OperationResult::Success
            }
            Err(err) => {
                warn!(error = %err, "failed to store payment");
                OperationResult::Failure(err.message_id_or(MessageId::PaymentSaveFailed))
            }
        }
    }

    fn check_policies(&self, invoice: &SupplierInvoice, payment: &PaymentDetails) -> Result<()> {
        if invoice.has_payment(payment.payment_id()) {
            if self.config.rejects_duplicates() {
                return Err(InvoiceError::DuplicatePayment {
                    invoice_id: invoice.invoice_id(),
                    payment_id: payment.payment_id(),
                });
            }
            warn!("payment id already recorded, counting it again");
        }

        let due = invoice.rest_due_amount();
        if payment.amount_paid() > due {
            if self.config.rejects_overpayment() {
                return Err(InvoiceError::PaymentExceedsDueAmount {
                    due,
                    provided: payment.amount_paid(),
                });
            }
            warn!(due = %due, "payment exceeds amount due, recording overpayment");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::invoice::NewSupplierInvoice;
    use crate::repository::InMemorySupplierInvoiceRepository;
    use crate::types::{PaymentMethod, PaymentStatus};
    use chrono::{Duration, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use uuid::Uuid;

    async fn stored_invoice(repo: &InMemorySupplierInvoiceRepository, time: &SafeTimeProvider) -> SupplierInvoice {
        let invoice = SupplierInvoice::create(
            NewSupplierInvoice {
                supplier_id: Uuid::new_v4(),
                invoice_number: "DAIRY-311".to_string(),
                total_amount: Money::from_major(1_000),
                issue_date: time.now(),
                due_date: time.now() + Duration::days(30),
                notes: None,
                created_by: "owner".to_string(),
            },
            time.now(),
        )
        .unwrap();
        repo.add_invoice(invoice.clone()).await.unwrap();
        invoice
    }

    #[tokio::test]
    async fn test_strict_policy_refuses_overpayment() {
        let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()));
        let repo = Arc::new(InMemorySupplierInvoiceRepository::new());
        let mut invoice = stored_invoice(&repo, &time).await;
        let use_case = AddPaymentDetailsUseCase::with_config(repo.clone(), LedgerConfig::strict());

        let payment = PaymentDetails::new(Money::from_major(1_001), PaymentMethod::Cash, time.now(), "owner").unwrap();
        let result = use_case.execute(&mut invoice, payment, &time).await;

        assert_eq!(result, OperationResult::Failure(MessageId::PaymentExceedsDueAmount));
        assert!(invoice.payment_details().is_empty());
        assert_eq!(invoice.payment_status(), PaymentStatus::Pending);
        assert!(repo.get_invoice(invoice.invoice_id()).await.unwrap().payment_details().is_empty());

        // exactly the amount due is still accepted
        let payment = PaymentDetails::new(Money::from_major(1_000), PaymentMethod::Cash, time.now(), "owner").unwrap();
        assert!(use_case.execute(&mut invoice, payment, &time).await.is_success());
        assert_eq!(invoice.payment_status(), PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_strict_policy_refuses_duplicate_payment() {
        let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()));
        let repo = Arc::new(InMemorySupplierInvoiceRepository::new());
        let mut invoice = stored_invoice(&repo, &time).await;
        let use_case = AddPaymentDetailsUseCase::with_config(repo.clone(), LedgerConfig::strict());

        let payment = PaymentDetails::new(Money::from_major(100), PaymentMethod::Card, time.now(), "owner").unwrap();
        assert!(use_case.execute(&mut invoice, payment.clone(), &time).await.is_success());

        let result = use_case.execute(&mut invoice, payment, &time).await;
        assert_eq!(result, OperationResult::Failure(MessageId::DuplicatePayment));
        assert_eq!(invoice.payment_details().len(), 1);
        assert_eq!(invoice.version(), 1);
    }

    #[tokio::test]
    async fn test_permissive_policy_records_overpayment() {
        let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()));
        let repo = Arc::new(InMemorySupplierInvoiceRepository::new());
        let mut invoice = stored_invoice(&repo, &time).await;
        let use_case = AddPaymentDetailsUseCase::new(repo.clone());

        let payment = PaymentDetails::new(Money::from_major(1_200), PaymentMethod::BankTransfer, time.now(), "owner")
            .unwrap();
        assert!(use_case.execute(&mut invoice, payment, &time).await.is_success());
        assert_eq!(invoice.payment_status(), PaymentStatus::Paid);
        assert_eq!(invoice.overpaid_amount(), Money::from_major(200));
    }
}
