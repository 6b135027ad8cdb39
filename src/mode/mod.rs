//! Change-event classification and dispatch.

mod classifier;
mod creator;
mod dispatcher;
mod event;
mod governance;
mod node_path;
mod pipeline;
mod registry;
mod subscriber;

pub use classifier::*;
pub use creator::*;
pub use dispatcher::*;
pub use event::*;
pub use governance::*;
pub use node_path::*;
pub use pipeline::*;
pub use registry::*;
pub use subscriber::*;

#[cfg(test)]
mod governance_test;
