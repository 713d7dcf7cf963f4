//! Wire format of the upstream post search.
//!
//! Only the fields the proxy reads are declared; everything else in the
//! upstream JSON is ignored.

use serde::Deserialize;

use crate::models::{AssetVariant, PostResult, VariantKind};

#[derive(Debug, Clone, Deserialize)]
pub struct PostDto {
    pub id: i64,
    #[serde(default)]
    pub media_asset: Option<MediaAssetDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaAssetDto {
    #[serde(default)]
    pub variants: Vec<VariantDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl From<VariantDto> for AssetVariant {
    fn from(dto: VariantDto) -> Self {
        AssetVariant {
            kind: VariantKind::from_upstream(&dto.kind),
            url: dto.url,
            width: dto.width,
            height: dto.height,
        }
    }
}

impl From<PostDto> for PostResult {
    fn from(dto: PostDto) -> Self {
        PostResult {
            id: dto.id,
            variants: dto
                .media_asset
                .map(|asset| asset.variants.into_iter().map(AssetVariant::from).collect())
                .unwrap_or_default(),
        }
    }
}

/// Parses a search response body into posts, preserving upstream order.
pub fn parse_posts(body: &str) -> Result<Vec<PostResult>, serde_json::Error> {
    let posts: Vec<PostDto> = serde_json::from_str(body)?;
    Ok(posts.into_iter().map(PostResult::from).collect())
}
