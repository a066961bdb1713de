/// quick start - record an invoice and pay part of it
use std::sync::Arc;

use supplier_invoice_rs::chrono::Duration;
use supplier_invoice_rs::{
    AddPaymentDetailsUseCase, AddSupplierInvoiceUseCase, InMemorySupplierInvoiceRepository, Money,
    NewSupplierInvoice, PaymentDetails, PaymentMethod, SafeTimeProvider, TimeSource, Uuid,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);
    let repo = Arc::new(InMemorySupplierInvoiceRepository::new());

    // record a 1,000 invoice due in two weeks
    let mut invoice = AddSupplierInvoiceUseCase::new(repo.clone())
        .execute(
            NewSupplierInvoice {
                supplier_id: Uuid::new_v4(),
                invoice_number: "VEG-2291".to_string(),
                total_amount: Money::from_major(1_000),
                issue_date: time.now(),
                due_date: time.now() + Duration::days(14),
                notes: None,
                created_by: "owner".to_string(),
            },
            &time,
        )
        .await
        .into_invoice()
        .ok_or("invoice was not recorded")?;

    // pay 300 in cash
    let payment = PaymentDetails::new(Money::from_major(300), PaymentMethod::Cash, time.now(), "owner")?;
    let result = AddPaymentDetailsUseCase::new(repo.clone())
        .execute(&mut invoice, payment, &time)
        .await;

    println!("result: {:?}", result);
    println!("status: {}, still due: {}", invoice.payment_status(), invoice.rest_due_amount());

    Ok(())
}
