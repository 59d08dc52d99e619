//! Ordered, fail-fast validation pipeline.
//!
//! This crate provides:
//!
//! - **Handler**: one independent check that approves or rejects a request
//! - **Pipeline**: an immutable, ordered set of handlers evaluated left to right
//! - **EvaluationTrace**: which handlers ran and which one rejected
//! - **PipelineConfig**: YAML definitions for the shipment vetting handlers
//!
//! # Architecture
//!
//! ```text
//! PipelineConfig (YAML) ──► PipelineBuilder ──build──► Pipeline<R>
//!                                                          │
//!                                request ──► evaluate ─────┤
//!                                                          ▼
//!                                         Outcome { Approved | Rejected(reason) }
//! ```
//!
//! # Example
//!
//! ```
//! use approval_chain::shipment::{SecurityCheck, ShipmentRequest, WeightCheck};
//! use approval_chain::{Outcome, Pipeline};
//!
//! let pipeline = Pipeline::builder()
//!     .append(WeightCheck::new(1000.0))
//!     .append(SecurityCheck::new(["Explosives"]))
//!     .build();
//!
//! let request = ShipmentRequest::new()
//!     .with("weight", 5000)
//!     .with("cargo", "Explosives");
//! assert_eq!(
//!     pipeline.evaluate(&request),
//!     Outcome::rejected("Weight exceeds limit")
//! );
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod outcome;
pub mod pipeline;
pub mod report;
pub mod shipment;
pub mod trace;

pub use config::{HandlerSpec, PipelineConfig};
pub use error::ConfigError;
pub use handler::{handler_fn, CheckError, FnHandler, Handler};
pub use outcome::Outcome;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use trace::EvaluationTrace;
