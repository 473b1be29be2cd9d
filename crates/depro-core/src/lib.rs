//! depro-core
//!
//! Recomputation engine and services for the delivery-progress ledger.
//! Depends on depro-domain. No CLI, no terminal I/O, no concrete storage
//! backends — stores plug in through [`store::LedgerStore`].

pub mod aggregate;
pub mod carry;
pub mod error;
pub mod options;
pub mod recompute_service;
pub mod store;
pub mod summary_service;
pub mod trace;

pub use aggregate::*;
pub use carry::*;
pub use error::CoreError;
pub use options::*;
pub use recompute_service::*;
pub use store::*;
pub use summary_service::*;
