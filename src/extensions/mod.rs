//! View-consumer contract.
//!
//! Charts, counters, titles and dropdowns plug in here. They observe derived
//! values and never reach into the dataset or filter internals.

pub mod consumers;

pub use consumers::{
    AggregateKey, AggregateValue, ConsumerContext, FnConsumer, ViewConsumer,
};

pub(crate) use consumers::control_value;
