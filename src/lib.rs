pub mod config;
pub mod decimal;
pub mod document;
pub mod errors;
pub mod events;
pub mod invoice;
pub mod outcome;
pub mod payment;
pub mod repository;
pub mod status;
pub mod types;
pub mod usecases;

// re-export key types
pub use config::{DuplicatePaymentPolicy, LedgerConfig, OverpaymentPolicy};
pub use decimal::Money;
pub use document::{PaymentDetailsDocument, SupplierInvoiceDocument};
pub use errors::{InvoiceError, Result};
pub use events::{EventStore, InvoiceEvent};
pub use invoice::{InvoiceUpdate, NewSupplierInvoice, SupplierInvoice};
pub use outcome::{MessageId, OperationResult};
pub use payment::PaymentDetails;
pub use repository::{InMemorySupplierInvoiceRepository, Resource, SupplierInvoiceRepository};
pub use status::{derive_status, derive_status_from_totals};
pub use types::{InvoiceId, PaymentId, PaymentMethod, PaymentStatus, SupplierId};
pub use usecases::{
    AddPaymentDetailsUseCase, AddSupplierInvoiceUseCase, CreatedInvoice, GetSupplierInvoicesUseCase,
    UpdateSupplierInvoiceUseCase,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
