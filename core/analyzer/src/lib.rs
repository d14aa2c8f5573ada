#![warn(clippy::pedantic)]
//! Channel misuse rules for Go.
//!
//! The [`engine::Engine`] walks one file at a time and reports three families
//! of findings:
//!
//! - sends that may block forever: any send outside a `select`, and sends in a
//!   `select` that has neither a `default` clause nor a timeout receive
//! - `make(chan T)` without a capacity
//! - literal capacities of zero or above a configured limit
//!
//! Every heuristic fails open. An expression the classifier cannot decide on
//! (a capacity held in a variable, a timer created elsewhere) produces no
//! finding.

pub mod classifier;
pub mod clause;
pub mod diagnostics;
pub mod engine;
pub mod settings;

pub use diagnostics::{Diagnostics, Finding, Reporter, Rule, Severity};
pub use engine::Engine;
pub use settings::Settings;
