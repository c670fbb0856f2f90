//! Moment Selector — keeps the most important moments within the panel budget.
//!
//! Pure ranking, no orchestration calls. The kept moments come back in
//! narrative order so the page still reads front to back.

use tracing::debug;

use crate::models::beat::Moment;

/// Selects at most `target` moments by importance, preserving original order.
///
/// Algorithm:
/// 1. `moments.len() <= target` → returned as-is
/// 2. Rank indices by importance descending; equal importance → lower index first
/// 3. Keep the first `target` indices
/// 4. Restore ascending index order
pub fn select_moments(moments: Vec<Moment>, target: usize) -> Vec<Moment> {
    if moments.len() <= target {
        return moments;
    }

    let mut ranked: Vec<usize> = (0..moments.len()).collect();
    ranked.sort_by(|&a, &b| {
        moments[b]
            .importance
            .total_cmp(&moments[a].importance)
            .then(a.cmp(&b))
    });

    let mut keep: Vec<usize> = ranked.into_iter().take(target).collect();
    keep.sort_unstable();

    debug!(
        "Selected {} of {} moments (budget {})",
        keep.len(),
        moments.len(),
        target
    );

    let mut slots: Vec<Option<Moment>> = moments.into_iter().map(Some).collect();
    keep.into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}
