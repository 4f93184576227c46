use models::invoice::InvoiceTerms;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub invoice_terms: Arc<InvoiceTerms>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, invoice_terms: InvoiceTerms) -> Self {
        Self {
            db,
            invoice_terms: Arc::new(invoice_terms),
        }
    }
}
