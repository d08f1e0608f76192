pub mod config;
pub mod domain;
pub mod errors;

pub use domain::price::{normalize_price, PRICE_PRECISION, PRICE_SCALE};
pub use domain::product::{category_matches, Product, ProductDraft, ProductId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
