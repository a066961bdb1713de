use thiserror::Error;
use uuid::Uuid;

use crate::decimal::Money;
use crate::outcome::MessageId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvoiceError {
    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("invalid invoice amount: {amount}")]
    InvalidInvoiceAmount {
        amount: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("payment exceeds amount due: due {due}, provided {provided}")]
    PaymentExceedsDueAmount {
        due: Money,
        provided: Money,
    },

    #[error("payment {payment_id} already recorded on invoice {invoice_id}")]
    DuplicatePayment {
        invoice_id: Uuid,
        payment_id: Uuid,
    },

    #[error("invoice not found: {invoice_id}")]
    InvoiceNotFound {
        invoice_id: Uuid,
    },

    #[error("invoice already exists: {invoice_id}")]
    DuplicateInvoice {
        invoice_id: Uuid,
    },

    #[error("version conflict on invoice {invoice_id}: expected {expected}, found {found}")]
    VersionConflict {
        invoice_id: Uuid,
        expected: u64,
        found: u64,
    },

    #[error("invalid document field {field}: {message}")]
    InvalidDocument {
        field: String,
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("persistence failure: {message}")]
    Persistence {
        message: String,
    },
}

impl InvoiceError {
    /// localized message shown for this error; storage failures collapse to `save_failed`
    pub fn message_id_or(&self, save_failed: MessageId) -> MessageId {
        match self {
            InvoiceError::InvalidPaymentAmount { .. } => MessageId::InvalidPaymentAmount,
            InvoiceError::InvalidInvoiceAmount { .. } => MessageId::InvalidInvoiceAmount,
            InvoiceError::InvalidDate { .. } => MessageId::InvalidDueDate,
            InvoiceError::PaymentExceedsDueAmount { .. } => MessageId::PaymentExceedsDueAmount,
            InvoiceError::DuplicatePayment { .. } => MessageId::DuplicatePayment,
            InvoiceError::InvoiceNotFound { .. } => MessageId::InvoiceNotFound,
            InvoiceError::VersionConflict { .. } => MessageId::ConcurrentModification,
            InvoiceError::DuplicateInvoice { .. }
            | InvoiceError::InvalidDocument { .. }
            | InvoiceError::Persistence { .. } => save_failed,
            InvoiceError::InvalidConfiguration { .. } => MessageId::GenericError,
        }
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id_or(MessageId::GenericError)
    }
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
