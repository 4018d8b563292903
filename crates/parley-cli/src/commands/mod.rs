//! Command implementations.

pub mod generate;
pub mod inspect;
pub mod symbols;
pub mod validate;

pub use self::generate::{execute_generate, run_generation};
pub use self::inspect::execute_inspect;
pub use self::symbols::execute_symbols;
pub use self::validate::execute_validate;
