//! Response sanitization pipeline.
//!
//! Raw Productive responses are JSON:API envelopes full of pagination links,
//! empty values, internal bookkeeping fields and HTML. This module reduces
//! them to the smallest structure an agent needs to identify, link and act on
//! a resource.
//!
//! # Architecture
//!
//! - `policy`: static per-kind field tables (`ResourceKind` → `AttributePolicy`)
//! - `html`: tag stripping for rich-text attributes
//! - `pipeline`: the bottom-up recursive filter (`Sanitizer`)
//!
//! The pipeline never fails: values whose shape does not match their context
//! pass through unchanged.

mod html;
mod pipeline;
mod policy;


pub use html::strip_html;
pub use pipeline::{Projection, Sanitizer, WEBAPP_URL_FIELD, is_empty};
pub use policy::{AttributePolicy, ResourceKind, TASK_ESSENTIAL_FIELDS};
