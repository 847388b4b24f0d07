//! `labelforge-labeler` — the pharmaceutical label batch tool.
//!
//! Renders a fixed set of product barcodes into an output directory, one
//! PNG per product, and records the run in a `manifest.json`. Jobs fail
//! independently: a bad payload is logged and skipped, never aborting the
//! rest of the batch.

pub mod batch;

pub use batch::{
    JobFailure, LabelJob, LabelRecord, MANIFEST_FILE, RunManifest, batch_defaults, run_batch,
    standard_batch,
};
