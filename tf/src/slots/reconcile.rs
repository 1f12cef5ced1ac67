//! Segment-state reconciliation
//!
//! Segments are mutated piecemeal by untrusted external collaborators: a
//! search provider drops options into the pool without touching the status,
//! an LLM controller writes a status that contradicts the data. Invariant
//! breaks WILL occur transiently, so they are corrected rather than
//! rejected - availability over strictness. The repair pass is pure,
//! applied in a fixed rule order, idempotent, and never fails.

use tracing::debug;

use super::all_segments_mut;
use crate::domain::{Segment, SegmentStatus, SlotKind, TripPlan};

/// Repair a segment so its status agrees with its data
///
/// Rules, in order:
/// 1. confirmed without a selection -> pending (upstream corruption;
///    demoting is safer than crashing)
/// 2. selecting with an empty pool -> pending
/// 3. a selection present but status neither confirmed nor selecting ->
///    confirmed (a selection implies confirmation intent)
/// 4. options present, status pending, no selection -> selecting
///
/// Returns whether anything changed. Safe to call after every external
/// mutation; a second call in a row never changes anything.
pub fn ensure_segment_state(segment: &mut Segment, kind: SlotKind) -> bool {
    let mut changed = false;

    if segment.status == SegmentStatus::Confirmed && segment.selected_option.is_none() {
        debug!(slot = %kind, "reconcile: confirmed without selection, demoting to pending");
        segment.status = SegmentStatus::Pending;
        changed = true;
    }

    if segment.status == SegmentStatus::Selecting && segment.options_pool.is_empty() {
        debug!(slot = %kind, "reconcile: selecting with empty pool, demoting to pending");
        segment.status = SegmentStatus::Pending;
        changed = true;
    }

    if segment.selected_option.is_some()
        && !matches!(segment.status, SegmentStatus::Confirmed | SegmentStatus::Selecting)
    {
        debug!(slot = %kind, status = %segment.status, "reconcile: selection present, promoting to confirmed");
        segment.status = SegmentStatus::Confirmed;
        changed = true;
    }

    if !segment.options_pool.is_empty()
        && segment.status == SegmentStatus::Pending
        && segment.selected_option.is_none()
    {
        debug!(slot = %kind, options = segment.options_pool.len(), "reconcile: options landed, promoting to selecting");
        segment.status = SegmentStatus::Selecting;
        changed = true;
    }

    changed
}

/// Read-only invariant check, reporting human-readable issues
///
/// For diagnostics and summaries, not control flow: issues here are the
/// same conditions `ensure_segment_state` would repair.
pub fn validate_segment(segment: &Segment, kind: SlotKind) -> Vec<String> {
    let mut issues = Vec::new();

    if segment.status == SegmentStatus::Confirmed && segment.selected_option.is_none() {
        issues.push(format!("{kind}: confirmed but no option selected"));
    }
    if segment.status == SegmentStatus::Selecting && segment.options_pool.is_empty() {
        issues.push(format!("{kind}: selecting but options pool is empty"));
    }
    if segment.selected_option.is_some()
        && !matches!(segment.status, SegmentStatus::Confirmed | SegmentStatus::Selecting)
    {
        issues.push(format!(
            "{kind}: option selected but status is {}",
            segment.status
        ));
    }
    if !segment.options_pool.is_empty()
        && segment.status == SegmentStatus::Pending
        && segment.selected_option.is_none()
    {
        issues.push(format!("{kind}: options available but still pending"));
    }

    issues
}

/// Repair every segment in the plan, returning how many changed
pub fn reconcile_plan(plan: &mut TripPlan) -> usize {
    let mut repaired = 0;
    for (kind, _, segment) in all_segments_mut(plan) {
        if ensure_segment_state(segment, kind) {
            repaired += 1;
        }
    }
    if repaired > 0 {
        debug!(repaired, "reconcile_plan: repaired segments");
    }
    repaired
}
