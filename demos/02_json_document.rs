/// json document - store an invoice as a document and load it back
use supplier_invoice_rs::chrono::{Duration, TimeZone, Utc};
use supplier_invoice_rs::{
    Money, NewSupplierInvoice, PaymentDetails, PaymentMethod, SupplierInvoice, SupplierInvoiceDocument, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let invoice = SupplierInvoice::create(
        NewSupplierInvoice {
            supplier_id: Uuid::new_v4(),
            invoice_number: "PKG-310".to_string(),
            total_amount: Money::from_minor(48_075, 2),
            issue_date: now,
            due_date: now + Duration::days(7),
            notes: None,
            created_by: "owner".to_string(),
        },
        now,
    )?;

    let document = SupplierInvoiceDocument::from(&invoice);
    let json = document.to_json_pretty()?;
    println!("{}", json);

    // tamper with the stored amount; loading refuses it
    let mut broken = SupplierInvoiceDocument::from_json(&json)?;
    broken.total_amount = "-1".to_string();
    match SupplierInvoice::try_from(broken) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(err) => println!("rejected: {}", err),
    }

    let restored = SupplierInvoice::try_from(SupplierInvoiceDocument::from_json(&json)?)?;
    let payment = PaymentDetails::new(Money::from_major(100), PaymentMethod::MobileWallet, now, "owner")?;
    println!(
        "restored {} owing {}; a payment of {} would leave {}",
        restored.invoice_number(),
        restored.rest_due_amount(),
        payment.amount_paid(),
        restored.rest_due_amount().saturating_sub(payment.amount_paid()),
    );

    Ok(())
}
