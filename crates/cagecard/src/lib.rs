pub mod stats;
pub mod store;
pub mod types;
pub mod ufc;
pub mod utils;

pub use store::JsonStore;
