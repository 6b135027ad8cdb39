//! Live, per-database rule state read by query execution and mutated only by
//! rule changed subscribers.

mod context_manager;
mod database_rules;
mod instance_context;

pub use context_manager::*;
pub use database_rules::*;
pub use instance_context::*;

#[cfg(test)]
mod database_rules_test;
