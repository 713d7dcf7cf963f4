//! Upstream search parameter construction.

use crate::config::UPSTREAM_RESULT_LIMIT;
use crate::models::ImageQuery;

use super::variant::width_band;

pub const PARAM_TAGS_MATCH: &str = "search[tags_match]";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_ORDER: &str = "search[order]";
pub const PARAM_IMAGE_WIDTH: &str = "search[image_width]";

/// Builds the query string pairs for the upstream post search.
pub fn build_search_params(query: &ImageQuery) -> Vec<(String, String)> {
    let mut params = vec![
        (PARAM_TAGS_MATCH.to_string(), query.tag_expression()),
        (PARAM_LIMIT.to_string(), UPSTREAM_RESULT_LIMIT.to_string()),
        (
            PARAM_ORDER.to_string(),
            query.order_mode.as_upstream_order().to_string(),
        ),
    ];

    if let Some(width) = query.target_width {
        let (min_width, max_width) = width_band(width);
        params.push((
            PARAM_IMAGE_WIDTH.to_string(),
            format!("{}..{}", min_width, max_width),
        ));
    }

    params
}
