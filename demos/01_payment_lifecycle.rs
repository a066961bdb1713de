/// payment lifecycle - watch an invoice move through every status
use std::sync::Arc;

use supplier_invoice_rs::chrono::{Duration, TimeZone, Utc};
use supplier_invoice_rs::{
    AddPaymentDetailsUseCase, AddSupplierInvoiceUseCase, InMemorySupplierInvoiceRepository, LedgerConfig, Money,
    NewSupplierInvoice, PaymentDetails, PaymentMethod, SafeTimeProvider, TimeSource, Uuid,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== supplier invoice lifecycle ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    let controller = time.test_control().unwrap();
    let repo = Arc::new(InMemorySupplierInvoiceRepository::new());

    let mut invoice = AddSupplierInvoiceUseCase::new(repo.clone())
        .execute(
            NewSupplierInvoice {
                supplier_id: Uuid::new_v4(),
                invoice_number: "MEAT-0815".to_string(),
                total_amount: Money::from_major(2_400),
                issue_date: time.now(),
                due_date: time.now() + Duration::days(30),
                notes: Some("monthly delivery".to_string()),
                created_by: "manager".to_string(),
            },
            &time,
        )
        .await
        .into_invoice()
        .ok_or("invoice was not recorded")?;
    println!("1. recorded on {}: {}", time.now().format("%Y-%m-%d"), invoice.payment_status());

    // strict ledger: no overpayments, no resubmitted payments
    let pay = AddPaymentDetailsUseCase::with_config(repo.clone(), LedgerConfig::strict());

    controller.advance(Duration::days(10));
    let first = PaymentDetails::new(Money::from_major(1_000), PaymentMethod::BankTransfer, time.now(), "manager")?
        .with_reference("TRX-55120");
    pay.execute(&mut invoice, first.clone(), &time).await;
    println!("2. paid 1000 on {}: {}", time.now().format("%Y-%m-%d"), invoice.payment_status());

    let again = pay.execute(&mut invoice, first, &time).await;
    println!("3. resubmitting the same payment: {:?}", again);

    controller.advance(Duration::days(25));
    let second = PaymentDetails::new(Money::from_major(400), PaymentMethod::Cash, time.now(), "manager")?;
    pay.execute(&mut invoice, second, &time).await;
    println!("4. paid 400 on {}: {}", time.now().format("%Y-%m-%d"), invoice.payment_status());

    let too_much = PaymentDetails::new(Money::from_major(1_500), PaymentMethod::Card, time.now(), "manager")?;
    let refused = pay.execute(&mut invoice, too_much, &time).await;
    println!("5. paying 1500 with {} due: {:?}", invoice.rest_due_amount(), refused);

    let rest = PaymentDetails::new(invoice.rest_due_amount(), PaymentMethod::Card, time.now(), "manager")?;
    pay.execute(&mut invoice, rest, &time).await;
    println!("6. paid the rest: {} (version {})", invoice.payment_status(), invoice.version());

    println!("\nevents:");
    for event in repo.events().await {
        println!("  {:?}", event);
    }

    Ok(())
}
