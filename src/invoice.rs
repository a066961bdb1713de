use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{InvoiceError, Result};
use crate::payment::PaymentDetails;
use crate::status::derive_status;
use crate::types::{InvoiceId, PaymentId, PaymentStatus, SupplierId};

/// request to record a new supplier invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupplierInvoice {
    pub supplier_id: SupplierId,
    pub invoice_number: String,
    pub total_amount: Money,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_by: String,
}

/// header fields that can be corrected after an invoice was recorded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceUpdate {
    pub total_amount: Option<Money>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// a bill from a supplier together with every payment recorded against it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierInvoice {
    pub(crate) invoice_id: InvoiceId,
    pub(crate) supplier_id: SupplierId,
    pub(crate) invoice_number: String,
    pub(crate) total_amount: Money,
    pub(crate) issue_date: DateTime<Utc>,
    pub(crate) due_date: DateTime<Utc>,
    pub(crate) payment_status: PaymentStatus,
    // recording order, not payment-date order
    pub(crate) payment_details: Vec<PaymentDetails>,
    pub(crate) notes: Option<String>,
    pub(crate) created_by: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) version: u64,
}

impl SupplierInvoice {
    /// build a new invoice with a fresh id and its status derived at `now`
    pub fn create(request: NewSupplierInvoice, now: DateTime<Utc>) -> Result<Self> {
        validate_terms(request.total_amount, request.issue_date, request.due_date)?;

        let mut invoice = Self {
            invoice_id: Uuid::new_v4(),
            supplier_id: request.supplier_id,
            invoice_number: request.invoice_number,
            total_amount: request.total_amount,
            issue_date: request.issue_date,
            due_date: request.due_date,
            payment_status: PaymentStatus::Pending,
            payment_details: Vec::new(),
            notes: request.notes,
            created_by: request.created_by,
            created_at: now,
            version: 0,
        };
        invoice.refresh_status(now);
        Ok(invoice)
    }

    pub fn invoice_id(&self) -> InvoiceId {
        self.invoice_id
    }

    pub fn supplier_id(&self) -> SupplierId {
        self.supplier_id
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn issue_date(&self) -> DateTime<Utc> {
        self.issue_date
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn payment_details(&self) -> &[PaymentDetails] {
        &self.payment_details
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// number of committed changes since creation
    pub fn version(&self) -> u64 {
        self.version
    }

    /// sum of every recorded payment
    pub fn total_paid(&self) -> Money {
        self.payment_details.iter().map(PaymentDetails::amount_paid).sum()
    }

    /// amount still owed, never negative
    pub fn rest_due_amount(&self) -> Money {
        self.total_amount.saturating_sub(self.total_paid())
    }

    /// amount paid beyond the invoice total
    pub fn overpaid_amount(&self) -> Money {
        self.total_paid().saturating_sub(self.total_amount)
    }

    pub fn has_payment(&self, payment_id: PaymentId) -> bool {
        self.payment_details.iter().any(|p| p.payment_id() == payment_id)
    }

    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        now > self.due_date
    }

    /// re-derive the status at `now`, returning the new value
    pub fn refresh_status(&mut self, now: DateTime<Utc>) -> PaymentStatus {
        let status = derive_status(self, now);
        if status != self.payment_status {
            debug!(
                invoice_id = %self.invoice_id,
                old_status = %self.payment_status,
                new_status = %status,
                "payment status changed"
            );
            self.payment_status = status;
        }
        status
    }

    /// working copy with the payment appended and the status re-derived; version unchanged
    pub(crate) fn with_payment(&self, payment: PaymentDetails, now: DateTime<Utc>) -> Self {
        let mut copy = self.clone();
        copy.payment_details.push(payment);
        copy.refresh_status(now);
        copy
    }

    /// working copy with the update applied and the status re-derived; version unchanged
    pub(crate) fn amended(&self, update: InvoiceUpdate, now: DateTime<Utc>) -> Result<Self> {
        let mut copy = self.clone();
        if let Some(total) = update.total_amount {
            copy.total_amount = total;
        }
        if let Some(due_date) = update.due_date {
            copy.due_date = due_date;
        }
        if update.notes.is_some() {
            copy.notes = update.notes;
        }
        validate_terms(copy.total_amount, copy.issue_date, copy.due_date)?;
        copy.refresh_status(now);
        Ok(copy)
    }

    /// store-side commit of a payment with the status computed by the caller
    pub(crate) fn apply_payment(&mut self, payment: PaymentDetails, status: PaymentStatus) {
        self.payment_details.push(payment);
        self.payment_status = status;
        self.version += 1;
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }
}

fn validate_terms(total_amount: Money, issue_date: DateTime<Utc>, due_date: DateTime<Utc>) -> Result<()> {
    if total_amount.is_negative() {
        return Err(InvoiceError::InvalidInvoiceAmount { amount: total_amount });
    }
    if due_date < issue_date {
        return Err(InvoiceError::InvalidDate {
            message: format!("due date {due_date} is before issue date {issue_date}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn request(total: i64, due_in_days: i64) -> NewSupplierInvoice {
        NewSupplierInvoice {
            supplier_id: Uuid::new_v4(),
            invoice_number: "SUP-2024-0001".to_string(),
            total_amount: Money::from_major(total),
            issue_date: start(),
            due_date: start() + Duration::days(due_in_days),
            notes: None,
            created_by: "owner".to_string(),
        }
    }

    fn payment(amount: i64) -> PaymentDetails {
        PaymentDetails::new(Money::from_major(amount), PaymentMethod::Cash, start(), "owner").unwrap()
    }

    #[test]
    fn test_new_invoice_is_pending() {
        let invoice = SupplierInvoice::create(request(1_000, 30), start()).unwrap();

        assert_eq!(invoice.payment_status(), PaymentStatus::Pending);
        assert_eq!(invoice.version(), 0);
        assert_eq!(invoice.total_paid(), Money::ZERO);
        assert_eq!(invoice.rest_due_amount(), Money::from_major(1_000));
        assert!(invoice.payment_details().is_empty());
    }

    #[test]
    fn test_invoice_entered_after_due_date_is_overdue() {
        let invoice = SupplierInvoice::create(request(1_000, 30), start() + Duration::days(45)).unwrap();
        assert_eq!(invoice.payment_status(), PaymentStatus::Overdue);
    }

    #[test]
    fn test_create_validation() {
        let err = SupplierInvoice::create(request(-1, 30), start()).unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidInvoiceAmount { .. }));

        let err = SupplierInvoice::create(request(100, -1), start()).unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidDate { .. }));

        // zero total is allowed and immediately paid
        let free = SupplierInvoice::create(request(0, 30), start()).unwrap();
        assert_eq!(free.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn test_with_payment_leaves_original_untouched() {
        let invoice = SupplierInvoice::create(request(1_000, 30), start()).unwrap();
        let copy = invoice.with_payment(payment(300), start() + Duration::days(1));

        assert!(invoice.payment_details().is_empty());
        assert_eq!(invoice.payment_status(), PaymentStatus::Pending);
        assert_eq!(copy.payment_details().len(), 1);
        assert_eq!(copy.payment_status(), PaymentStatus::PartiallyPaid);
        assert_eq!(copy.version(), invoice.version());
    }

    #[test]
    fn test_overpayment_amounts() {
        let invoice = SupplierInvoice::create(request(1_000, 30), start())
            .unwrap()
            .with_payment(payment(700), start())
            .with_payment(payment(500), start());

        assert_eq!(invoice.total_paid(), Money::from_major(1_200));
        assert_eq!(invoice.rest_due_amount(), Money::ZERO);
        assert_eq!(invoice.overpaid_amount(), Money::from_major(200));
        assert_eq!(invoice.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn test_refresh_status_after_due_date_passes() {
        let mut invoice = SupplierInvoice::create(request(1_000, 30), start()).unwrap();
        assert!(!invoice.is_past_due(start() + Duration::days(30)));

        let status = invoice.refresh_status(start() + Duration::days(31));
        assert_eq!(status, PaymentStatus::Overdue);
        assert_eq!(invoice.payment_status(), PaymentStatus::Overdue);
    }

    #[test]
    fn test_amended_revalidates_and_rederives() {
        let invoice = SupplierInvoice::create(request(1_000, 30), start())
            .unwrap()
            .with_payment(payment(400), start());

        // lowering the total to what was paid settles the invoice
        let settled = invoice
            .amended(
                InvoiceUpdate {
                    total_amount: Some(Money::from_major(400)),
                    ..Default::default()
                },
                start(),
            )
            .unwrap();
        assert_eq!(settled.payment_status(), PaymentStatus::Paid);

        let err = invoice
            .amended(
                InvoiceUpdate {
                    due_date: Some(start() - Duration::days(1)),
                    ..Default::default()
                },
                start(),
            )
            .unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidDate { .. }));
    }
}
