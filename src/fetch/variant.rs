//! Variant selection.
//!
//! Picks the rendition to download from a post's variant list. Pure and
//! deterministic: the same input always yields the same variant, and ties are
//! always broken by upstream order.

use crate::config::WIDTH_TOLERANCE;
use crate::models::{AssetVariant, VariantKind};

/// Inclusive width band `[target - 100, target + 100]`, floored at zero.
pub fn width_band(target_width: u32) -> (u32, u32) {
    (
        target_width.saturating_sub(WIDTH_TOLERANCE),
        target_width.saturating_add(WIDTH_TOLERANCE),
    )
}

/// Selects one variant to serve.
///
/// - Without a target width: the first `Sample` variant, else the first variant.
/// - With a target width: the widest variant inside the band, else the variant
///   closest to the target.
///
/// Returns `None` only when `variants` is empty.
pub fn select_variant(variants: &[AssetVariant], target_width: Option<u32>) -> Option<&AssetVariant> {
    let first = variants.first()?;

    let Some(target) = target_width else {
        return Some(
            variants
                .iter()
                .find(|v| v.kind == VariantKind::Sample)
                .unwrap_or(first),
        );
    };

    let (min_width, max_width) = width_band(target);
    let widest_in_band = variants
        .iter()
        .filter(|v| (min_width..=max_width).contains(&v.width))
        .fold(None::<&AssetVariant>, |best, v| match best {
            Some(b) if b.width >= v.width => Some(b),
            _ => Some(v),
        });
    if widest_in_band.is_some() {
        return widest_in_band;
    }

    // min_by_key keeps the first of equal keys
    variants.iter().min_by_key(|v| v.width.abs_diff(target))
}
