pub mod gated_store;
pub mod setup;
pub mod utils;
