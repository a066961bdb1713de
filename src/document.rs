use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{InvoiceError, Result};
use crate::invoice::SupplierInvoice;
use crate::payment::PaymentDetails;
use crate::types::{PaymentMethod, PaymentStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInvoiceDocument {
    pub invoice_id: String,
    pub supplier_id: String,
    pub invoice_number: String,
    pub total_amount: String,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub payment_status: String,
    #[serde(default)]
    pub payment_details: Vec<PaymentDetailsDocument>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailsDocument {
    pub payment_id: String,
    pub payment_date: DateTime<Utc>,
    pub created_by: String,
    pub payment_method: String,
    pub amount_paid: String,
    #[serde(default)]
    pub reference: Option<String>,
}

impl SupplierInvoiceDocument {
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| InvoiceError::InvalidDocument {
            field: "document".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| InvoiceError::InvalidDocument {
            field: "document".to_string(),
            message: e.to_string(),
        })
    }
}

impl From<&PaymentDetails> for PaymentDetailsDocument {
    fn from(payment: &PaymentDetails) -> Self {
        Self {
            payment_id: payment.payment_id().to_string(),
            payment_date: payment.payment_date(),
            created_by: payment.created_by().to_string(),
            payment_method: payment.payment_method().as_str().to_string(),
            amount_paid: payment.amount_paid().to_string(),
            reference: payment.reference().map(str::to_string),
        }
    }
}

impl From<&SupplierInvoice> for SupplierInvoiceDocument {
    fn from(invoice: &SupplierInvoice) -> Self {
        Self {
            invoice_id: invoice.invoice_id().to_string(),
            supplier_id: invoice.supplier_id().to_string(),
            invoice_number: invoice.invoice_number().to_string(),
            total_amount: invoice.total_amount().to_string(),
            issue_date: invoice.issue_date(),
            due_date: invoice.due_date(),
            payment_status: invoice.payment_status().as_str().to_string(),
            payment_details: invoice.payment_details().iter().map(PaymentDetailsDocument::from).collect(),
            notes: invoice.notes().map(str::to_string),
            created_by: invoice.created_by().to_string(),
            created_at: invoice.created_at(),
            version: invoice.version(),
        }
    }
}

impl TryFrom<PaymentDetailsDocument> for PaymentDetails {
    type Error = InvoiceError;

    fn try_from(doc: PaymentDetailsDocument) -> Result<Self> {
        let payment_id = parse_uuid("paymentId", &doc.payment_id)?;
        let amount = parse_money("amountPaid", &doc.amount_paid)?;
        let method: PaymentMethod = doc.payment_method.parse()?;

        let payment = PaymentDetails::with_id(payment_id, amount, method, doc.payment_date, doc.created_by)
            .map_err(|e| invalid("amountPaid", e.to_string()))?;
        Ok(match doc.reference {
            Some(reference) => payment.with_reference(reference),
            None => payment,
        })
    }
}

impl TryFrom<SupplierInvoiceDocument> for SupplierInvoice {
    type Error = InvoiceError;

    fn try_from(doc: SupplierInvoiceDocument) -> Result<Self> {
        let total_amount = parse_money("totalAmount", &doc.total_amount)?;
        if total_amount.is_negative() {
            return Err(invalid("totalAmount", format!("negative total {total_amount}")));
        }
        if doc.due_date < doc.issue_date {
            return Err(invalid("dueDate", "due date is before issue date"));
        }
        let payment_status: PaymentStatus = doc.payment_status.parse()?;
        let payment_details = doc
            .payment_details
            .into_iter()
            .map(PaymentDetails::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(SupplierInvoice {
            invoice_id: parse_uuid("invoiceId", &doc.invoice_id)?,
            supplier_id: parse_uuid("supplierId", &doc.supplier_id)?,
            invoice_number: doc.invoice_number,
            total_amount,
            issue_date: doc.issue_date,
            due_date: doc.due_date,
            payment_status,
            payment_details,
            notes: doc.notes,
            created_by: doc.created_by,
            created_at: doc.created_at,
            version: doc.version,
        })
    }
}

fn invalid(field: &str, message: impl Into<String>) -> InvoiceError {
    InvoiceError::InvalidDocument {
        field: field.to_string(),
        message: message.into(),
    }
}

fn parse_uuid(field: &str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| invalid(field, e.to_string()))
}

fn parse_money(field: &str, value: &str) -> Result<Money> {
    Money::from_str_exact(value).map_err(|e| invalid(field, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::NewSupplierInvoice;
    use chrono::{Duration, TimeZone};

    fn stored_invoice() -> SupplierInvoice {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 8, 30, 0).unwrap();
        let payment = PaymentDetails::new(Money::from_minor(25_050, 2), PaymentMethod::Cheque, start, "clerk")
            .unwrap()
            .with_reference("CHQ-1182");
        SupplierInvoice::create(
            NewSupplierInvoice {
                supplier_id: Uuid::new_v4(),
                invoice_number: "F-2024-118".to_string(),
                total_amount: Money::from_major(1_000),
                issue_date: start,
                due_date: start + Duration::days(14),
                notes: Some("flour and yeast".to_string()),
                created_by: "clerk".to_string(),
            },
            start,
        )
        .unwrap()
        .with_payment(payment, start)
    }

    #[test]
    fn test_document_restores_invoice() {
        let invoice = stored_invoice();
        let json = SupplierInvoiceDocument::from(&invoice).to_json_pretty().unwrap();

        assert!(json.contains("\"paymentStatus\": \"PARTIALLY_PAID\""));
        assert!(json.contains("\"amountPaid\": \"250.50\""));

        let doc = SupplierInvoiceDocument::from_json(&json).unwrap();
        let restored = SupplierInvoice::try_from(doc).unwrap();
        assert_eq!(restored, invoice);
    }

    #[test]
    fn test_negative_total_is_rejected() {
        let mut doc = SupplierInvoiceDocument::from(&stored_invoice());
        doc.total_amount = "-10.00".to_string();

        let err = SupplierInvoice::try_from(doc).unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidDocument { ref field, .. } if field == "totalAmount"));
    }

    #[test]
    fn test_non_positive_payment_is_rejected() {
        let mut doc = SupplierInvoiceDocument::from(&stored_invoice());
        doc.payment_details[0].amount_paid = "0".to_string();

        let err = SupplierInvoice::try_from(doc).unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidDocument { ref field, .. } if field == "amountPaid"));
    }

    #[test]
    fn test_malformed_fields_are_rejected() {
        let mut doc = SupplierInvoiceDocument::from(&stored_invoice());
        doc.invoice_id = "not-a-uuid".to_string();
        assert!(SupplierInvoice::try_from(doc).is_err());

        let mut doc = SupplierInvoiceDocument::from(&stored_invoice());
        doc.payment_status = "SETTLED".to_string();
        assert!(SupplierInvoice::try_from(doc).is_err());

        let mut doc = SupplierInvoiceDocument::from(&stored_invoice());
        doc.payment_details[0].amount_paid = "twelve".to_string();
        assert!(SupplierInvoice::try_from(doc).is_err());

        assert!(SupplierInvoiceDocument::from_json("{ \"invoiceId\": 7 }").is_err());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{
            "invoiceId": "8f2b7a2e-3c4d-4e5f-9a0b-1c2d3e4f5a6b",
            "supplierId": "1a2b3c4d-5e6f-4a0b-8c9d-0e1f2a3b4c5d",
            "invoiceNumber": "A-1",
            "totalAmount": "99.90",
            "issueDate": "2024-05-01T00:00:00Z",
            "dueDate": "2024-05-31T00:00:00Z",
            "paymentStatus": "PENDING",
            "createdBy": "owner",
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;

        let invoice = SupplierInvoice::try_from(SupplierInvoiceDocument::from_json(json).unwrap()).unwrap();
        assert!(invoice.payment_details().is_empty());
        assert!(invoice.notes().is_none());
        assert_eq!(invoice.version(), 0);
        assert_eq!(invoice.total_amount(), Money::from_minor(9_990, 2));
    }
}
