use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::InvoiceError;

/// unique identifier for a supplier invoice
pub type InvoiceId = Uuid;

/// unique identifier for a supplier
pub type SupplierId = Uuid;

/// unique identifier for a recorded payment
pub type PaymentId = Uuid;

/// payment status of a supplier invoice, always derived from its payments and due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// nothing paid yet, due date not reached
    Pending,
    /// some money received, due date not reached
    PartiallyPaid,
    /// payments cover the invoice total
    Paid,
    /// due date passed and the invoice is not fully paid
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::PartiallyPaid => "PARTIALLY_PAID",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Overdue => "OVERDUE",
        }
    }

    /// whether money is still owed to the supplier
    pub fn is_outstanding(&self) -> bool {
        !matches!(self, PaymentStatus::Paid)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PARTIALLY_PAID" => Ok(PaymentStatus::PartiallyPaid),
            "PAID" => Ok(PaymentStatus::Paid),
            "OVERDUE" => Ok(PaymentStatus::Overdue),
            other => Err(InvoiceError::InvalidDocument {
                field: "paymentStatus".to_string(),
                message: format!("unknown payment status {other:?}"),
            }),
        }
    }
}

/// how a supplier was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Cheque,
    MobileWallet,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Cheque => "CHEQUE",
            PaymentMethod::MobileWallet => "MOBILE_WALLET",
            PaymentMethod::Other => "OTHER",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASH" => Ok(PaymentMethod::Cash),
            "CARD" => Ok(PaymentMethod::Card),
            "BANK_TRANSFER" => Ok(PaymentMethod::BankTransfer),
            "CHEQUE" => Ok(PaymentMethod::Cheque),
            "MOBILE_WALLET" => Ok(PaymentMethod::MobileWallet),
            "OTHER" => Ok(PaymentMethod::Other),
            other => Err(InvoiceError::InvalidDocument {
                field: "paymentMethod".to_string(),
                message: format!("unknown payment method {other:?}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_forms_match_serde() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::PartiallyPaid,
            PaymentStatus::Paid,
            PaymentStatus::Overdue,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<PaymentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let err = "CRYPTO".parse::<PaymentMethod>().unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidDocument { .. }));
        assert_eq!("BANK_TRANSFER".parse::<PaymentMethod>().unwrap(), PaymentMethod::BankTransfer);
    }

    #[test]
    fn test_only_paid_is_settled() {
        assert!(!PaymentStatus::Paid.is_outstanding());
        assert!(PaymentStatus::Overdue.is_outstanding());
        assert!(PaymentStatus::Pending.is_outstanding());
    }
}
