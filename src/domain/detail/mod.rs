//! Detail domain module.
//!
//! Facet requests for the movie detail dialog and the dialog lifecycle.

mod facet;
mod status;

pub use facet::{DetailPayload, DetailRequest, Facet, UnknownFacet};
pub use status::DetailStatus;
