pub mod add_invoice;
pub mod add_payment;
pub mod get_invoices;
pub mod update_invoice;

pub use add_invoice::{AddSupplierInvoiceUseCase, CreatedInvoice};
pub use add_payment::AddPaymentDetailsUseCase;
pub use get_invoices::GetSupplierInvoicesUseCase;
pub use update_invoice::UpdateSupplierInvoiceUseCase;
