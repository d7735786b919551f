//! Best-icon selection
//!
//! [`IconRanker`] measures candidates that declare no size and then applies
//! the tiered selection of [`criteria`]. Measuring works on copies; the
//! caller's candidates are never touched.

pub mod criteria;
pub mod size_probe;

pub use criteria::{fits_size, rank, rank_preferred_sizes, RankCriteria};
pub use size_probe::{dimensions_from_bytes, is_measurable, probe_icon, ProbedIcon};

use std::collections::HashMap;

use futures::future::join_all;

use crate::config::FinderConfig;
use crate::icon::IconCandidate;
use crate::web::WebClient;

pub struct IconRanker<C> {
    client: C,
    max_icon_bytes: usize,
}

impl<C: WebClient> IconRanker<C> {
    #[must_use]
    pub fn new(client: C, config: &FinderConfig) -> Self {
        Self {
            client,
            max_icon_bytes: config.max_icon_bytes(),
        }
    }

    /// Copies of `candidates` with sizes filled in where they could be measured
    ///
    /// Each candidate without size is downloaded at most once, all of them
    /// concurrently. Afterwards every candidate is marked as tried, and the
    /// downloaded bytes travel along so existence checks can skip them.
    pub async fn resolve_sizes(&self, candidates: &[IconCandidate]) -> Vec<IconCandidate> {
        let mut urls_to_probe: Vec<&str> = candidates
            .iter()
            .filter(|candidate| needs_probe(candidate) && is_measurable(&candidate.url))
            .map(|candidate| candidate.url.as_str())
            .collect();
        urls_to_probe.sort_unstable();
        urls_to_probe.dedup();

        let probes = join_all(
            urls_to_probe
                .iter()
                .map(|url| probe_icon(&self.client, url, self.max_icon_bytes)),
        )
        .await;
        let probed: HashMap<&str, ProbedIcon> = urls_to_probe.into_iter().zip(probes).collect();

        candidates
            .iter()
            .map(|candidate| {
                let mut resolved = candidate.clone();

                if needs_probe(candidate) {
                    resolved.tried_to_retrieve_size = true;

                    if let Some(probe) = probed.get(candidate.url.as_str()) {
                        resolved.size = probe.size;
                        resolved.image_bytes = probe.bytes.clone();
                    }
                }

                resolved
            })
            .collect()
    }

    /// Measure, then pick the best candidate for `criteria`
    pub async fn select_best(
        &self,
        candidates: &[IconCandidate],
        criteria: &RankCriteria,
    ) -> Option<IconCandidate> {
        let resolved = self.resolve_sizes(candidates).await;

        rank(&resolved, criteria).cloned()
    }

    /// Measure, then pick a candidate of one of `preferred_sizes`
    ///
    /// See [`rank_preferred_sizes`].
    pub async fn select_best_of_preferred_sizes(
        &self,
        candidates: &[IconCandidate],
        preferred_sizes: &[u32],
        require_square: bool,
        ignore_parameters_as_last_resort: bool,
    ) -> Option<IconCandidate> {
        let resolved = self.resolve_sizes(candidates).await;

        rank_preferred_sizes(
            &resolved,
            preferred_sizes,
            require_square,
            ignore_parameters_as_last_resort,
        )
        .cloned()
    }
}

fn needs_probe(candidate: &IconCandidate) -> bool {
    candidate.size.is_none() && !candidate.tried_to_retrieve_size
}
