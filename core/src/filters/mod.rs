mod error;
mod store;

pub use error::SelectionError;
pub use store::FilterStore;
