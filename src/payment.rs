use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{InvoiceError, Result};
use crate::types::{PaymentId, PaymentMethod};

/// one payment made to a supplier against an invoice
///
/// Immutable once built. The amount is always strictly positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    payment_id: PaymentId,
    payment_date: DateTime<Utc>,
    created_by: String,
    payment_method: PaymentMethod,
    amount_paid: Money,
    reference: Option<String>,
}

impl PaymentDetails {
    /// create a payment with a fresh id
    pub fn new(
        amount_paid: Money,
        payment_method: PaymentMethod,
        payment_date: DateTime<Utc>,
        created_by: impl Into<String>,
    ) -> Result<Self> {
        Self::with_id(Uuid::new_v4(), amount_paid, payment_method, payment_date, created_by)
    }

    /// create a payment with a known id, e.g. when loading stored payments
    pub fn with_id(
        payment_id: PaymentId,
        amount_paid: Money,
        payment_method: PaymentMethod,
        payment_date: DateTime<Utc>,
        created_by: impl Into<String>,
    ) -> Result<Self> {
        if !amount_paid.is_positive() {
            return Err(InvoiceError::InvalidPaymentAmount { amount: amount_paid });
        }

        Ok(Self {
            payment_id,
            payment_date,
            created_by: created_by.into(),
            payment_method,
            amount_paid,
            reference: None,
        })
    }

    /// attach a cheque number, transfer reference or similar
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn payment_id(&self) -> PaymentId {
        self.payment_id
    }

    pub fn payment_date(&self) -> DateTime<Utc> {
        self.payment_date
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn amount_paid(&self) -> Money {
        self.amount_paid
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}
