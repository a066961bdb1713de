use chrono::{DateTime, Utc};

use crate::decimal::Money;
use crate::invoice::SupplierInvoice;
use crate::types::PaymentStatus;

/// derive the status of an invoice at `now`
pub fn derive_status(invoice: &SupplierInvoice, now: DateTime<Utc>) -> PaymentStatus {
    derive_status_from_totals(invoice.total_amount(), invoice.total_paid(), invoice.due_date(), now)
}

/// derive a status from raw totals
///
/// Full payment wins over everything, then a passed due date, then whether
/// anything was paid at all. A zero total is therefore always `Paid`.
pub fn derive_status_from_totals(
    total_amount: Money,
    total_paid: Money,
    due_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> PaymentStatus {
    if total_paid >= total_amount {
        return PaymentStatus::Paid;
    }

    match (total_paid.is_positive(), now > due_date) {
        (_, true) => PaymentStatus::Overdue,
        (true, false) => PaymentStatus::PartiallyPaid,
        (false, false) => PaymentStatus::Pending,
    }
}
