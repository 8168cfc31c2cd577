pub mod generation;
pub mod oracle;
