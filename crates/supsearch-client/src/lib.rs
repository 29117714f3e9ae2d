pub mod client;
pub mod error;
pub mod session;

pub use client::{SupplierSearch, SupplierSearchClient};
pub use error::SearchError;
pub use session::{SearchPhase, SearchSession, SearchTicket, SessionError};
