//! Image fetching.
//!
//! - `query`: upstream search parameters from an `ImageQuery`
//! - `variant`: width-aware variant selection
//! - `pipeline`: search, select, download, with every failure folded into a
//!   `FetchOutcome`

mod pipeline;
mod query;
mod variant;

pub use pipeline::FetchPipeline;
pub use query::{
    build_search_params, PARAM_IMAGE_WIDTH, PARAM_LIMIT, PARAM_ORDER, PARAM_TAGS_MATCH,
};
pub use variant::{select_variant, width_band};
