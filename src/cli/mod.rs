//! CLI operation handlers.
//!
//! - [`gate`]: Load the CI event, run the gate, and report
//!
//! Output formatting utilities are in [`output`].

pub mod gate;
pub mod output;
