//! Movie detail dialog.

mod resolve_detail;

pub use resolve_detail::{DetailDialog, DetailError, DetailResolver, DetailView};
