//! Reporting and plotting helpers used by the CLI.
//!
//! `plots` converts scoring results into `plotly::Plot`s; `report` assembles
//! markup blocks and plots into a standalone HTML page.
pub mod plots;
pub mod report;
