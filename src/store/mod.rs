//! Append-only quotation storage: one insert, one "latest" read.

mod memory;

pub use memory::MemoryQuotations;

use crate::database::Database;
use crate::error::AppError;
use crate::models::{NewQuotation, Quotation};

#[derive(Clone)]
pub enum QuotationStore {
    Postgres(Database),
    Memory(MemoryQuotations),
}

impl QuotationStore {
    /// Persists one quotation and returns its id.
    pub async fn insert(&self, new: &NewQuotation) -> Result<i64, AppError> {
        match self {
            QuotationStore::Postgres(db) => Ok(Quotation::insert(new, db).await?),
            QuotationStore::Memory(mem) => mem.insert(new),
        }
    }

    pub async fn latest(&self) -> Result<Option<Quotation>, AppError> {
        match self {
            QuotationStore::Postgres(db) => Ok(Quotation::latest(db).await?),
            QuotationStore::Memory(mem) => mem.latest(),
        }
    }
}
