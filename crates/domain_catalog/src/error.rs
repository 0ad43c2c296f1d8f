//! Catalog domain errors

use thiserror::Error;

/// Errors that can occur in the catalog domain
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Discount rule violates a value invariant
    #[error("Invalid discount rule: {0}")]
    InvalidRule(String),

    /// Price row violates a value invariant
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Tax type violates a value invariant
    #[error("Invalid tax type: {0}")]
    InvalidTax(String),

    /// An entity with the same id was already registered
    #[error("Duplicate {entity}: {id}")]
    Duplicate { entity: &'static str, id: String },

    /// A registered entity references an unknown entity
    #[error("Unknown {entity} referenced by {referrer}: {id}")]
    UnknownReference {
        entity: &'static str,
        referrer: &'static str,
        id: String,
    },
}
