use serde::{Deserialize, Serialize};

use crate::errors::{InvoiceError, Result};

/// what to do with a payment that pushes the total paid above the invoice total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverpaymentPolicy {
    /// record it; the excess shows up as an overpaid amount
    #[default]
    Allow,
    /// refuse the payment
    Reject,
}

/// what to do with a payment whose id is already recorded on the invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePaymentPolicy {
    /// record it again; totals count it twice
    #[default]
    Allow,
    /// refuse the payment
    Reject,
}

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub overpayment_policy: OverpaymentPolicy,
    pub duplicate_payment_policy: DuplicatePaymentPolicy,
}

impl LedgerConfig {
    /// accept every positive payment, matching how invoices have always been recorded
    pub fn permissive() -> Self {
        Self::default()
    }

    /// refuse overpayments and resubmitted payments
    pub fn strict() -> Self {
        Self {
            overpayment_policy: OverpaymentPolicy::Reject,
            duplicate_payment_policy: DuplicatePaymentPolicy::Reject,
        }
    }

    /// load from json; missing fields fall back to the permissive defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| InvoiceError::InvalidConfiguration {
            message: e.to_string(),
        })
    }

    pub fn rejects_overpayment(&self) -> bool {
        self.overpayment_policy == OverpaymentPolicy::Reject
    }

    pub fn rejects_duplicates(&self) -> bool {
        self.duplicate_payment_policy == DuplicatePaymentPolicy::Reject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_permissive() {
        let config = LedgerConfig::default();
        assert_eq!(config, LedgerConfig::permissive());
        assert!(!config.rejects_overpayment());
        assert!(!config.rejects_duplicates());
    }

    #[test]
    fn test_from_json_partial() {
        let config = LedgerConfig::from_json(r#"{ "overpayment_policy": "reject" }"#).unwrap();
        assert!(config.rejects_overpayment());
        assert!(!config.rejects_duplicates());

        let config = LedgerConfig::from_json("{}").unwrap();
        assert_eq!(config, LedgerConfig::permissive());
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        let err = LedgerConfig::from_json(r#"{ "duplicate_payment_policy": "merge" }"#).unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_strict_round_trips() {
        let json = serde_json::to_string(&LedgerConfig::strict()).unwrap();
        assert_eq!(LedgerConfig::from_json(&json).unwrap(), LedgerConfig::strict());
    }
}
