//! CLI command implementations

pub mod config;
pub mod environment;
pub mod labbook;
pub mod remote;

pub use config::execute as config;
pub use environment::execute as environment;
pub use labbook::execute as labbook;
pub use remote::execute as remote;
