use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::InvoiceError;

/// key of the localized message shown after a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageId {
    GenericError,
    PaymentSaveFailed,
    InvoiceSaveFailed,
    InvalidPaymentAmount,
    InvalidInvoiceAmount,
    InvalidDueDate,
    PaymentExceedsDueAmount,
    DuplicatePayment,
    ConcurrentModification,
    InvoiceNotFound,
}

impl MessageId {
    pub fn as_key(&self) -> &'static str {
        match self {
            MessageId::GenericError => "error_generic",
            MessageId::PaymentSaveFailed => "error_payment_save_failed",
            MessageId::InvoiceSaveFailed => "error_invoice_save_failed",
            MessageId::InvalidPaymentAmount => "error_invalid_payment_amount",
            MessageId::InvalidInvoiceAmount => "error_invalid_invoice_amount",
            MessageId::InvalidDueDate => "error_invalid_due_date",
            MessageId::PaymentExceedsDueAmount => "error_payment_exceeds_due_amount",
            MessageId::DuplicatePayment => "error_duplicate_payment",
            MessageId::ConcurrentModification => "error_concurrent_modification",
            MessageId::InvoiceNotFound => "error_invoice_not_found",
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// result returned by every write use case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationResult {
    Success,
    Failure(MessageId),
}

impl OperationResult {
    /// collapse a crate result, mapping storage failures to `save_failed`
    pub fn from_result<T>(result: Result<T, InvoiceError>, save_failed: MessageId) -> Self {
        match result {
            Ok(_) => OperationResult::Success,
            Err(err) => OperationResult::Failure(err.message_id_or(save_failed)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success)
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn message_id(&self) -> Option<MessageId> {
        match self {
            OperationResult::Success => None,
            OperationResult::Failure(id) => Some(*id),
        }
    }
}
