//! Tiered best-icon selection over candidates with known sizes
//!
//! Each tier filters the full candidate list again with relaxed constraints:
//!
//! 1. exact constraints, largest icon wins
//! 2. without the square requirement
//! 3. without the upper bound, the icon closest to it wins
//! 4. everything again without the extension exclusions
//!
//! When no tier matches, the first icon of unknown size is returned. Safari
//! mask icons are monochrome silhouettes and never take part.

use serde::{Deserialize, Serialize};

use crate::icon::{IconCandidate, IconType, Size};
use crate::utils::DEFAULT_MIN_ICON_SIZE;

/// Constraints for picking a single icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankCriteria {
    /// Both edges must be at least this long
    pub min_size: u32,
    /// Both edges must be at most this long
    pub max_size: Option<u32>,
    /// Prefer icons with equal edges, relaxed when none exists
    pub require_square: bool,
    /// URL suffixes like `.ico` to avoid, relaxed when nothing else exists
    pub exclude_extensions: Vec<String>,
}

impl Default for RankCriteria {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_ICON_SIZE,
            max_size: None,
            require_square: false,
            exclude_extensions: Vec::new(),
        }
    }
}

impl RankCriteria {
    #[must_use]
    pub fn min_size(mut self, min_size: u32) -> Self {
        self.min_size = min_size;
        self
    }

    #[must_use]
    pub fn max_size(mut self, max_size: u32) -> Self {
        self.max_size = Some(max_size);
        self
    }

    #[must_use]
    pub fn require_square(mut self, require_square: bool) -> Self {
        self.require_square = require_square;
        self
    }

    #[must_use]
    pub fn exclude_extension(mut self, extension: impl Into<String>) -> Self {
        self.exclude_extensions.push(extension.into());
        self
    }

    /// Only this exact size, square if requested
    #[must_use]
    pub fn exact(size: u32, require_square: bool) -> Self {
        Self {
            min_size: size,
            max_size: Some(size),
            require_square,
            exclude_extensions: Vec::new(),
        }
    }

    fn is_excluded(&self, url: &str) -> bool {
        self.exclude_extensions
            .iter()
            .any(|extension| url.ends_with(extension.as_str()))
    }
}

/// Check `size` against the bounds and the square requirement of `criteria`
#[must_use]
pub fn fits_size(size: Size, criteria: &RankCriteria) -> bool {
    let has_min_size = size.width >= criteria.min_size && size.height >= criteria.min_size;
    let has_max_size = criteria
        .max_size
        .is_none_or(|max_size| size.width <= max_size && size.height <= max_size);

    has_min_size && has_max_size && (!criteria.require_square || size.is_square())
}

/// Pick the best candidate for `criteria`
///
/// Sizes are taken as they are; run the candidates through
/// `IconRanker::resolve_sizes` first to measure undeclared ones.
#[must_use]
pub fn rank<'c>(candidates: &'c [IconCandidate], criteria: &RankCriteria) -> Option<&'c IconCandidate> {
    rank_known_sizes(candidates, criteria).or_else(|| first_of_unknown_size(candidates))
}

/// Pick a candidate of one of `preferred_sizes`, trying them in order
///
/// Only exact matches count. With `ignore_parameters_as_last_resort` the
/// general ranking bounded by the first preferred size decides when none
/// matches exactly.
#[must_use]
pub fn rank_preferred_sizes<'c>(
    candidates: &'c [IconCandidate],
    preferred_sizes: &[u32],
    require_square: bool,
    ignore_parameters_as_last_resort: bool,
) -> Option<&'c IconCandidate> {
    let exact_match = preferred_sizes
        .iter()
        .find_map(|&size| largest_fitting(candidates, &RankCriteria::exact(size, require_square)));

    if exact_match.is_some() {
        return exact_match;
    }

    match preferred_sizes.first() {
        Some(&first) if ignore_parameters_as_last_resort => rank(
            candidates,
            &RankCriteria::default()
                .max_size(first)
                .require_square(require_square),
        ),
        _ => None,
    }
}

fn rank_known_sizes<'c>(
    candidates: &'c [IconCandidate],
    criteria: &RankCriteria,
) -> Option<&'c IconCandidate> {
    if let Some(best) = largest_fitting(candidates, criteria) {
        return Some(best);
    }

    if criteria.require_square {
        let relaxed = criteria.clone().require_square(false);
        if let Some(best) = largest_fitting(candidates, &relaxed) {
            return Some(best);
        }
    }

    if let Some(max_size) = criteria.max_size {
        let unbounded = RankCriteria {
            max_size: None,
            require_square: false,
            ..criteria.clone()
        };
        if let Some(closest) = closest_fitting(candidates, &unbounded, max_size) {
            return Some(closest);
        }
    }

    if !criteria.exclude_extensions.is_empty() {
        let without_exclusions = RankCriteria {
            exclude_extensions: Vec::new(),
            ..criteria.clone()
        };
        return rank_known_sizes(candidates, &without_exclusions);
    }

    None
}

fn fitting<'c, 'r>(
    candidates: &'c [IconCandidate],
    criteria: &'r RankCriteria,
) -> impl Iterator<Item = (&'c IconCandidate, Size)> {
    candidates
        .iter()
        .filter(|candidate| candidate.icon_type != IconType::SafariMaskIcon)
        .filter(|candidate| !criteria.is_excluded(&candidate.url))
        .filter_map(|candidate| candidate.size.map(|size| (candidate, size)))
        .filter(|(_, size)| fits_size(*size, criteria))
}

/// Largest fitting candidate; the earlier one wins ties
fn largest_fitting<'c>(
    candidates: &'c [IconCandidate],
    criteria: &RankCriteria,
) -> Option<&'c IconCandidate> {
    let mut best: Option<(&IconCandidate, Size)> = None;

    for (candidate, size) in fitting(candidates, criteria) {
        if best.is_none_or(|(_, best_size)| size > best_size) {
            best = Some((candidate, size));
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// Fitting candidate whose longer edge is closest to `target`; the earlier one wins ties
fn closest_fitting<'c>(
    candidates: &'c [IconCandidate],
    criteria: &RankCriteria,
    target: u32,
) -> Option<&'c IconCandidate> {
    let mut best: Option<(&IconCandidate, u32)> = None;

    for (candidate, size) in fitting(candidates, criteria) {
        let distance = size.max_edge().abs_diff(target);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(candidate, _)| candidate)
}

fn first_of_unknown_size(candidates: &[IconCandidate]) -> Option<&IconCandidate> {
    candidates
        .iter()
        .find(|candidate| candidate.icon_type != IconType::SafariMaskIcon && candidate.size.is_none())
}
