//! CLI subcommand modules.
//!
//! One module per pipeline stage; `all` chains them in order.

pub(crate) mod calc;
pub(crate) mod config;
pub(crate) mod plot;
pub(crate) mod pull;
pub(crate) mod supplementary;
