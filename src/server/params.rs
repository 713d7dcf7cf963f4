//! `/image.jpg` query string parsing.

use url::form_urlencoded;

use crate::models::{ImageQuery, OrderMode};

pub const PARAM_WORK_NAME: &str = "work_name";
pub const PARAM_CHARACTER_NAME: &str = "character_name";
pub const PARAM_WIDTH: &str = "width";
pub const PARAM_SELECT_MODE: &str = "select_mode";
pub const PARAM_TAGS: &str = "tags[]";

/// Builds an `ImageQuery` from the raw query string.
///
/// Repeated `tags[]` keys keep their order. A lone `tags[]` value is also
/// split on commas. Blank strings count as absent, and a width that is not a
/// positive integer is ignored.
pub fn parse_image_query(raw: Option<&str>) -> ImageQuery {
    let mut copyright_tag = None;
    let mut character_tag = None;
    let mut width = None;
    let mut select_mode = None;
    let mut tags: Vec<String> = Vec::new();

    for (key, value) in form_urlencoded::parse(raw.unwrap_or("").as_bytes()) {
        let value = value.trim().to_string();
        match key.as_ref() {
            PARAM_WORK_NAME => copyright_tag = non_empty(value),
            PARAM_CHARACTER_NAME => character_tag = non_empty(value),
            PARAM_WIDTH => width = Some(value),
            PARAM_SELECT_MODE => select_mode = Some(value),
            PARAM_TAGS => tags.push(value),
            _ => {}
        }
    }

    if tags.len() == 1 && tags[0].contains(',') {
        tags = split_tag_list(&tags[0]);
    }
    tags.retain(|t| !t.is_empty());

    ImageQuery {
        copyright_tag,
        character_tag,
        free_tags: tags,
        target_width: width.as_deref().and_then(parse_width),
        order_mode: OrderMode::from_select_mode(select_mode.as_deref()),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn split_tag_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_width(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|w| *w > 0)
}
