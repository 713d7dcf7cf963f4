//! Domain types shared by the fetch pipeline, the dispatcher, and the server.

use bytes::Bytes;

use crate::error_handling::FailureKind;

/// Ordering requested from the upstream search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderMode {
    /// Newest first
    #[default]
    Latest,
    Random,
    ScoreDesc,
    FavCount,
    UpScore,
    Rank,
}

impl OrderMode {
    /// Parses the inbound `select_mode` parameter.
    ///
    /// Missing or unrecognized values fall back to `Latest`.
    pub fn from_select_mode(mode: Option<&str>) -> Self {
        match mode.map(str::trim) {
            Some("random") => OrderMode::Random,
            Some("score") => OrderMode::ScoreDesc,
            Some("fav_count") => OrderMode::FavCount,
            Some("up_score") => OrderMode::UpScore,
            Some("rank") => OrderMode::Rank,
            _ => OrderMode::Latest,
        }
    }

    /// Value of the upstream `search[order]` parameter.
    pub fn as_upstream_order(&self) -> &'static str {
        match self {
            OrderMode::Latest => "id_desc",
            OrderMode::Random => "random",
            OrderMode::ScoreDesc => "score_desc",
            OrderMode::FavCount => "fav_count",
            OrderMode::UpScore => "up_score",
            OrderMode::Rank => "rank",
        }
    }
}

/// One image search, built once per inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageQuery {
    pub copyright_tag: Option<String>,
    pub character_tag: Option<String>,
    pub free_tags: Vec<String>,
    /// Always positive when present
    pub target_width: Option<u32>,
    pub order_mode: OrderMode,
}

impl ImageQuery {
    /// Combined tag list in upstream order: copyright, character, then free tags.
    pub fn upstream_tags(&self) -> Vec<String> {
        let mut tags = Vec::with_capacity(self.free_tags.len() + 2);
        if let Some(copyright) = self.copyright_tag.as_deref().filter(|t| !t.is_empty()) {
            tags.push(format!("copyright:{}", copyright));
        }
        if let Some(character) = self.character_tag.as_deref().filter(|t| !t.is_empty()) {
            tags.push(format!("character:{}", character));
        }
        tags.extend(self.free_tags.iter().cloned());
        tags
    }

    /// Space-joined match expression sent as `search[tags_match]`.
    pub fn tag_expression(&self) -> String {
        self.upstream_tags().join(" ")
    }
}

/// Role of an asset variant within a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Sample,
    Original,
    Other,
}

impl VariantKind {
    /// Maps the upstream variant `type` string.
    pub fn from_upstream(kind: &str) -> Self {
        match kind {
            "sample" => VariantKind::Sample,
            "original" => VariantKind::Original,
            _ => VariantKind::Other,
        }
    }
}

/// One renderable rendition of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetVariant {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub kind: VariantKind,
}

/// A post with its variants in upstream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResult {
    pub id: i64,
    pub variants: Vec<AssetVariant>,
}

/// Result of one fetch job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { bytes: Bytes, content_type: String },
    Failure { kind: FailureKind, message: String },
}

impl FetchOutcome {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        FetchOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    /// Failure kind, or `None` for a success.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            FetchOutcome::Success { .. } => None,
            FetchOutcome::Failure { kind, .. } => Some(*kind),
        }
    }
}
