mod invoice;
mod line_item;
mod party;

pub use invoice::{InvoiceDocument, RecordKind, Revision};
pub use line_item::LineItem;
pub use party::{Address, Contact, Issuer, Organization, Tenant};
