pub mod adapter;
pub mod command;

pub use adapter::{FnOracle, Oracle, OracleAdapter, OutputShape};
pub use command::CommandOracle;
