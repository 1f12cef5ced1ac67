//! Slot registry - safe indexed access to a plan's segments
//!
//! Conversational edits arrive as index-addressed mutations ("add one more
//! hotel segment"), so the registry exposes an upsert-style accessor that
//! resolves loose slot names, guards indices, and appends fresh pending
//! segments on demand. Confirmation goes through `set_selected` only, so
//! the selected option and status can never disagree at the write site.

pub mod reconcile;

pub use reconcile::{ensure_segment_state, reconcile_plan, validate_segment};

use tracing::debug;

use crate::domain::{PlanError, Segment, SegmentStatus, SlotKind, TripPlan};

/// Resolve a slot name and return the segment at `index`
///
/// With `create_if_missing`, an index at or past the end appends exactly
/// ONE fresh pending segment and returns it together with the index it
/// actually landed at - the requested index is not padded toward. Without
/// it, an empty slot is the not-found case and an index past the end is
/// out of range.
pub fn segment_at<'a>(
    plan: &'a mut TripPlan,
    slot_name: &str,
    index: usize,
    create_if_missing: bool,
) -> Result<(&'a mut Segment, usize), PlanError> {
    let kind = SlotKind::resolve(slot_name)?;
    let list = plan.slot_mut(kind);

    if list.is_empty() && !create_if_missing {
        return Err(PlanError::EmptySlot(kind.as_str().to_string()));
    }

    if index >= list.len() {
        if !create_if_missing {
            return Err(PlanError::SegmentIndexOutOfRange {
                slot: kind.as_str().to_string(),
                index,
                len: list.len(),
            });
        }
        list.push(Segment::new());
        let actual = list.len() - 1;
        if actual != index {
            debug!(slot = %kind, requested = index, actual, "segment_at: appended at next free index");
        }
        return Ok((&mut list[actual], actual));
    }

    Ok((&mut list[index], index))
}

/// Flatten all slots into `(kind, index, segment)` tuples in fixed order
///
/// Order: outbound flights, inbound flights, accommodation, ground
/// transport. Used for validation sweeps and summaries.
pub fn all_segments(plan: &TripPlan) -> Vec<(SlotKind, usize, &Segment)> {
    SlotKind::ALL
        .iter()
        .flat_map(|&kind| {
            plan.slot(kind)
                .iter()
                .enumerate()
                .map(move |(index, segment)| (kind, index, segment))
        })
        .collect()
}

/// Mutable counterpart of [`all_segments`], same fixed order
///
/// Used by repair sweeps that touch every segment in the plan.
pub fn all_segments_mut(plan: &mut TripPlan) -> Vec<(SlotKind, usize, &mut Segment)> {
    let TripPlan {
        flights_outbound,
        flights_inbound,
        accommodation,
        ground_transport,
        ..
    } = plan;

    let mut segments = Vec::new();
    for (kind, list) in [
        (SlotKind::FlightsOutbound, flights_outbound),
        (SlotKind::FlightsInbound, flights_inbound),
        (SlotKind::Accommodation, accommodation),
        (SlotKind::GroundTransport, ground_transport),
    ] {
        for (index, segment) in list.iter_mut().enumerate() {
            segments.push((kind, index, segment));
        }
    }
    segments
}

/// Confirm a segment by choosing an option from its pool
///
/// The only sanctioned confirmation path: copies the option into
/// `selected_option` and sets the status in one step. Workflow advancement
/// is the caller's responsibility.
pub fn set_selected(
    segment: &mut Segment,
    kind: SlotKind,
    option_index: usize,
) -> Result<(), PlanError> {
    let Some(option) = segment.options_pool.get(option_index) else {
        return Err(PlanError::OptionIndexOutOfRange {
            index: option_index,
            len: segment.options_pool.len(),
        });
    };
    segment.selected_option = Some(option.clone());
    segment.status = SegmentStatus::Confirmed;
    debug!(slot = %kind, option_index, "set_selected: segment confirmed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_segment_at_returns_existing() {
        let mut plan = TripPlan::default();
        plan.accommodation.push(Segment::new());

        let (segment, index) = segment_at(&mut plan, "hotel", 0, false).unwrap();
        assert_eq!(index, 0);
        assert_eq!(segment.status, SegmentStatus::Pending);
    }

    #[test]
    fn test_segment_at_empty_slot_without_create_is_not_found() {
        let mut plan = TripPlan::default();
        let err = segment_at(&mut plan, "flights", 0, false).unwrap_err();
        assert!(matches!(err, PlanError::EmptySlot(slot) if slot == "flights_outbound"));
    }

    #[test]
    fn test_segment_at_past_end_without_create_is_out_of_range() {
        let mut plan = TripPlan::default();
        plan.flights_outbound.push(Segment::new());

        let err = segment_at(&mut plan, "flights", 2, false).unwrap_err();
        assert!(matches!(
            err,
            PlanError::SegmentIndexOutOfRange { index: 2, len: 1, .. }
        ));
    }

    #[test]
    fn test_segment_at_creates_on_empty_slot() {
        let mut plan = TripPlan::default();
        let (_, index) = segment_at(&mut plan, "transfer", 0, true).unwrap();
        assert_eq!(index, 0);
        assert_eq!(plan.ground_transport.len(), 1);
    }

    #[test]
    fn test_segment_at_far_index_appends_exactly_one() {
        let mut plan = TripPlan::default();
        plan.flights_outbound.push(Segment::new());

        // Requesting index 10 on a 1-element slot appends one segment and
        // reports where it actually landed
        let (segment, index) = segment_at(&mut plan, "flight", 10, true).unwrap();
        assert_eq!(index, 1);
        assert_eq!(segment.status, SegmentStatus::Pending);
        assert_eq!(plan.flights_outbound.len(), 2);
    }

    #[test]
    fn test_segment_at_unknown_slot() {
        let mut plan = TripPlan::default();
        let err = segment_at(&mut plan, "cruise", 0, true).unwrap_err();
        assert!(matches!(err, PlanError::UnknownSlot(_)));
    }

    #[test]
    fn test_all_segments_fixed_order() {
        let mut plan = TripPlan::default();
        plan.ground_transport.push(Segment::new());
        plan.flights_outbound.push(Segment::new());
        plan.flights_outbound.push(Segment::new());
        plan.accommodation.push(Segment::new());

        let tagged: Vec<(SlotKind, usize)> = all_segments(&plan)
            .into_iter()
            .map(|(kind, index, _)| (kind, index))
            .collect();
        assert_eq!(
            tagged,
            vec![
                (SlotKind::FlightsOutbound, 0),
                (SlotKind::FlightsOutbound, 1),
                (SlotKind::Accommodation, 0),
                (SlotKind::GroundTransport, 0),
            ]
        );
    }

    #[test]
    fn test_all_segments_mut_matches_order_and_mutates() {
        let mut plan = TripPlan::default();
        plan.flights_inbound.push(Segment::new());
        plan.ground_transport.push(Segment::new());
        plan.ground_transport.push(Segment::new());

        for (kind, index, segment) in all_segments_mut(&mut plan) {
            if kind == SlotKind::GroundTransport && index == 1 {
                segment.status = SegmentStatus::Searching;
            }
        }
        assert_eq!(plan.flights_inbound[0].status, SegmentStatus::Pending);
        assert_eq!(plan.ground_transport[0].status, SegmentStatus::Pending);
        assert_eq!(plan.ground_transport[1].status, SegmentStatus::Searching);

        let tagged: Vec<(SlotKind, usize)> = all_segments_mut(&mut plan)
            .into_iter()
            .map(|(kind, index, _)| (kind, index))
            .collect();
        assert_eq!(
            tagged,
            vec![
                (SlotKind::FlightsInbound, 0),
                (SlotKind::GroundTransport, 0),
                (SlotKind::GroundTransport, 1),
            ]
        );
    }

    #[test]
    fn test_set_selected_confirms_with_chosen_option() {
        let mut segment = Segment::new();
        segment.options_pool = vec![json!({"id": "A"}), json!({"id": "B"})];

        set_selected(&mut segment, SlotKind::Accommodation, 1).unwrap();
        assert_eq!(segment.status, SegmentStatus::Confirmed);
        assert_eq!(segment.selected_option, Some(json!({"id": "B"})));
        assert!(segment.is_complete());
    }

    #[test]
    fn test_set_selected_out_of_range() {
        let mut segment = Segment::new();
        segment.options_pool = vec![json!({"id": "A"})];

        let err = set_selected(&mut segment, SlotKind::FlightsOutbound, 3).unwrap_err();
        assert!(matches!(err, PlanError::OptionIndexOutOfRange { index: 3, len: 1 }));
        // Failed selection leaves the segment untouched
        assert_eq!(segment.status, SegmentStatus::Pending);
        assert!(segment.selected_option.is_none());
    }
}
