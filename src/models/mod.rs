pub mod quotation;

pub use quotation::{NewQuotation, Quotation};
