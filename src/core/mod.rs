//! Core building blocks of the composite chain: run parameters (`params`),
//! output naming (`layout`), tool command lines (`plan`) and the sequencing
//! of a full run (`pipeline`).
pub mod layout;
pub mod params;
pub mod pipeline;
pub mod plan;
