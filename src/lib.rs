//! Evenly-spaced streamline placement for gridded surface-current vector
//! fields.
//!
//! Given a [`flow_field::FlowField`] sampled on a regular lat/lon grid, this
//! crate places a set of two-ended polylines ([`streamline::Streamline`])
//! tangent to the flow everywhere, spaced a configurable geodesic distance
//! apart, using a geodesic adaptation of the Jobard-Lefer evenly-spaced
//! streamline algorithm with a multi-resolution level hierarchy — coarse
//! streamlines are placed first and thinned as the separation distance
//! shrinks toward the requested detail level.
//!
//! The entry point is [`driver::generate`]:
//!
//! ```no_run
//! use geostream::driver::{generate, PlacementParams};
//! use geostream::flow_field::{FlowField, FlowFieldMetadata};
//!
//! # fn build_metadata() -> FlowFieldMetadata { unimplemented!() }
//! # fn build_samples() -> Vec<(f64, f64)> { unimplemented!() }
//! let metadata = build_metadata();
//! let field = FlowField::new(build_samples(), &metadata)?;
//! let output = generate(&field, &PlacementParams::default())?;
//! println!("placed {} streamlines", output.streamlines.len());
//! # Ok::<(), geostream::error::StreamlineError>(())
//! ```
//!
//! Ingesting a container format into a [`flow_field::FlowFieldMetadata`],
//! queuing placement jobs, and packaging results for a tile service are
//! outside this crate's scope; it only computes the geometry.

pub mod bounds;
pub mod driver;
pub mod error;
pub mod flow;
pub mod flow_field;
pub mod geodesic;
pub mod integrator;
pub mod occupancy_grid;
pub mod output;
pub mod point;
pub mod streamline;

pub use bounds::Bounds;
pub use driver::{generate, generate_cancellable, PlacementOutput, PlacementParams};
pub use error::StreamlineError;
pub use flow::Flow;
pub use flow_field::{FlowField, FlowFieldMetadata};
pub use point::Point;
pub use streamline::{StreamPoint, Streamline};
