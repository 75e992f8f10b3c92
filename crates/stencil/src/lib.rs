//! Stencil - declare architecture diagrams in Rust and render them to files.
//!
//! Diagrams are built through a [`Diagram`] handle: declare nodes from the
//! fixed icon catalog, nest them in named groups, connect them with styled
//! edges, then finalize to write an SVG, PNG or PDF file. Layout is fully
//! deterministic: identical declarations always produce byte-identical
//! output.
//!
//! # Examples
//!
//! ```no_run
//! use stencil::{Diagram, Edge, RenderAttributes};
//!
//! # fn main() -> Result<(), stencil::Error> {
//! let mut diagram = Diagram::begin("web service", "web.svg", RenderAttributes::default())?;
//!
//! let ingress = diagram.node("loadbalancer", "Ingress")?;
//! let db = diagram.node("database", "Primary")?;
//!
//! diagram.group("Service Pool", |d| {
//!     let a = d.node("server", "svc-a")?;
//!     let b = d.node("server", "svc-b")?;
//!     d.connect(ingress, a, Edge::default())?;
//!     d.connect(ingress, b, Edge::default())?;
//!     d.connect(a, db, Edge::default().label("reads"))?;
//!     d.connect(b, db, Edge::default().label("reads"))?;
//!     Ok(())
//! })?;
//!
//! diagram.finalize()?;
//! # Ok(())
//! # }
//! ```

pub mod config;

mod builder;
mod error;
mod export;
mod layout;
mod structure;

pub use stencil_core::{catalog, color, draw, geometry, identifier, model};

pub use stencil_core::{
    color::Color,
    draw::StrokeStyle,
    model::{Direction, LayoutEngine},
};

pub use builder::{Diagram, Edge, EdgeRef, EndpointRef, GroupRef, NodeRef};
pub use config::{OutputFormat, RenderAttributes, load_config};
pub use error::Error;
