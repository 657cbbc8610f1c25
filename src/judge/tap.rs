use crate::model::{
    ArcTapRequest, LaneHoldRequest, LaneTapRequest, NoteSide, SustainJudgement, Timing,
};

/// Match this frame's discrete press events against pending lane tap and
/// arc tap requests, resolving at most one request per pressed side.
///
/// For each side, the closest lane tap by signed timing difference wins the
/// reverse-order scan (so later-enqueued requests win exact ties). The arc
/// tap scan reuses the running minimum as a search bound, but a lane tap
/// candidate is always resolved in preference to an arc tap, even when the
/// arc tap sits closer in time.
pub fn resolve_taps<P>(
    current_timing: Timing,
    lane_taps: &mut Vec<LaneTapRequest<P>>,
    arc_taps: &mut Vec<ArcTapRequest<P>>,
    pressed: &[NoteSide],
) {
    for side in pressed {
        if *side == NoteSide::Undefined {
            continue;
        }

        let mut min_diff = Timing::MAX;
        let mut lane_candidate: Option<usize> = None;
        for i in (0..lane_taps.len()).rev() {
            let diff = lane_taps[i].auto_at_timing - current_timing;
            if diff > min_diff {
                continue;
            }
            if NoteSide::from_lane(lane_taps[i].lane) == *side && diff < min_diff {
                min_diff = diff;
                lane_candidate = Some(i);
            }
        }

        // Bounded by the lane scan's minimum: only arc taps that would beat
        // the lane candidate are considered at all.
        let mut arc_candidate: Option<usize> = None;
        for i in (0..arc_taps.len()).rev() {
            let diff = arc_taps[i].auto_at_timing - current_timing;
            if diff > min_diff {
                continue;
            }
            let target = NoteSide::from_arc_tap(arc_taps[i].x, arc_taps[i].width);
            if (target == *side || target == NoteSide::Middle) && diff < min_diff {
                min_diff = diff;
                arc_candidate = Some(i);
            }
        }

        if let Some(i) = lane_candidate {
            let request = lane_taps.swap_remove(i);
            (request.receiver)(current_timing - request.auto_at_timing, request.properties);
        } else if let Some(i) = arc_candidate {
            let request = arc_taps.swap_remove(i);
            (request.receiver)(current_timing - request.auto_at_timing, request.properties);
        }
    }
}

/// Match this frame's held sides against pending lane hold requests.
///
/// Every request whose lane maps to a held side and whose window has opened
/// resolves immediately; unlike taps there is no closest-candidate
/// selection, so several holds on one side can resolve in the same frame.
pub fn resolve_holds<P>(
    current_timing: Timing,
    holds: &mut Vec<LaneHoldRequest<P>>,
    held: &[NoteSide],
) {
    for side in held {
        if *side == NoteSide::Undefined {
            continue;
        }

        let mut i = holds.len();
        while i > 0 {
            i -= 1;
            if current_timing < holds[i].start_at_timing {
                continue;
            }
            if NoteSide::from_lane(holds[i].lane) == *side {
                let request = holds.swap_remove(i);
                (request.receiver)(
                    SustainJudgement {
                        is_late: current_timing >= request.expire_at_timing,
                        is_judgement: request.is_judgement,
                    },
                    request.properties,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Shared log of receiver invocations: (label, payload).
    type Log<T> = Rc<RefCell<Vec<(&'static str, T)>>>;

    fn lane_tap(
        lane: i32,
        auto_at: Timing,
        label: &'static str,
        log: &Log<Timing>,
    ) -> LaneTapRequest<()> {
        let log = Rc::clone(log);
        LaneTapRequest {
            lane,
            start_at_timing: auto_at - 500,
            expire_at_timing: auto_at + 500,
            auto_at_timing: auto_at,
            receiver: Box::new(move |offset, ()| log.borrow_mut().push((label, offset))),
            properties: (),
        }
    }

    fn arc_tap(
        x: f32,
        auto_at: Timing,
        label: &'static str,
        log: &Log<Timing>,
    ) -> ArcTapRequest<()> {
        let log = Rc::clone(log);
        ArcTapRequest {
            x,
            width: 1.0,
            start_at_timing: auto_at - 500,
            expire_at_timing: auto_at + 500,
            auto_at_timing: auto_at,
            receiver: Box::new(move |offset, ()| log.borrow_mut().push((label, offset))),
            properties: (),
        }
    }

    fn hold(
        lane: i32,
        start_at: Timing,
        expire_at: Timing,
        label: &'static str,
        log: &Log<bool>,
    ) -> LaneHoldRequest<()> {
        let log = Rc::clone(log);
        LaneHoldRequest {
            lane,
            start_at_timing: start_at,
            expire_at_timing: expire_at,
            is_judgement: true,
            receiver: Box::new(move |judgement, ()| {
                log.borrow_mut().push((label, judgement.is_late));
            }),
            properties: (),
        }
    }

    fn new_log<T>() -> Log<T> {
        Rc::new(RefCell::new(Vec::new()))
    }

    // =========================================================================
    // resolve_taps
    // =========================================================================

    #[test]
    fn non_matching_side_leaves_queue_unchanged() {
        let log = new_log();
        let mut lane_taps = vec![lane_tap(1, 1000, "left", &log)];
        let mut arc_taps = Vec::new();

        resolve_taps(1000, &mut lane_taps, &mut arc_taps, &[NoteSide::Right]);

        assert_eq!(lane_taps.len(), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn resolves_with_signed_timing_error() {
        let log = new_log();
        let mut lane_taps = vec![lane_tap(1, 1000, "tap", &log)];

        resolve_taps(1020, &mut lane_taps, &mut Vec::new(), &[NoteSide::Left]);

        assert!(lane_taps.is_empty());
        assert_eq!(*log.borrow(), vec![("tap", 20)]);
    }

    #[test]
    fn early_press_reports_negative_error() {
        let log = new_log();
        let mut lane_taps = vec![lane_tap(1, 1000, "tap", &log)];

        resolve_taps(950, &mut lane_taps, &mut Vec::new(), &[NoteSide::Left]);

        assert_eq!(*log.borrow(), vec![("tap", -50)]);
    }

    #[test]
    fn smallest_signed_difference_wins() {
        let log = new_log();
        // The request behind the press beats the one further ahead: -30 < 80.
        let mut lane_taps = vec![
            lane_tap(1, 1080, "ahead", &log),
            lane_tap(2, 970, "behind", &log),
        ];

        resolve_taps(1000, &mut lane_taps, &mut Vec::new(), &[NoteSide::Left]);

        // Receiver payload is current - auto: 30ms late.
        assert_eq!(*log.borrow(), vec![("behind", 30)]);
        assert_eq!(lane_taps.len(), 1);
    }

    #[test]
    fn tie_breaks_to_later_enqueued_request() {
        let log = new_log();
        let mut lane_taps = vec![
            lane_tap(1, 1000, "first", &log),
            lane_tap(2, 1000, "second", &log),
        ];

        resolve_taps(1000, &mut lane_taps, &mut Vec::new(), &[NoteSide::Left]);

        // Reverse-order scan sees "second" first; the tie does not replace it.
        assert_eq!(*log.borrow(), vec![("second", 0)]);
    }

    #[test]
    fn lane_tap_outranks_equally_timed_arc_tap() {
        let lane_log = new_log();
        let arc_log = new_log();
        let mut lane_taps = vec![lane_tap(1, 1000, "lane", &lane_log)];
        let mut arc_taps = vec![arc_tap(0.0, 1000, "arc", &arc_log)];

        resolve_taps(1000, &mut lane_taps, &mut arc_taps, &[NoteSide::Left]);

        assert_eq!(*lane_log.borrow(), vec![("lane", 0)]);
        assert!(arc_log.borrow().is_empty());
        assert_eq!(arc_taps.len(), 1);
    }

    #[test]
    fn lane_tap_outranks_closer_arc_tap() {
        let lane_log = new_log();
        let arc_log = new_log();
        let mut lane_taps = vec![lane_tap(1, 1100, "lane", &lane_log)];
        let mut arc_taps = vec![arc_tap(0.0, 1010, "arc", &arc_log)];

        resolve_taps(1000, &mut lane_taps, &mut arc_taps, &[NoteSide::Left]);

        // The arc tap is closer (10 vs 100) but the lane tap still wins.
        assert_eq!(*lane_log.borrow(), vec![("lane", 100)]);
        assert!(arc_log.borrow().is_empty());
    }

    #[test]
    fn arc_tap_resolves_when_no_lane_tap_matches() {
        let log = new_log();
        let mut arc_taps = vec![arc_tap(0.0, 1000, "arc", &log)];

        resolve_taps(1000, &mut Vec::<LaneTapRequest<()>>::new(), &mut arc_taps, &[NoteSide::Left]);

        assert_eq!(*log.borrow(), vec![("arc", 0)]);
        assert!(arc_taps.is_empty());
    }

    #[test]
    fn middle_arc_tap_matches_either_side() {
        for side in [NoteSide::Left, NoteSide::Right] {
            let log = new_log();
            let mut arc_taps = vec![arc_tap(0.5, 1000, "middle", &log)];

            resolve_taps(1000, &mut Vec::<LaneTapRequest<()>>::new(), &mut arc_taps, &[side]);

            assert_eq!(*log.borrow(), vec![("middle", 0)]);
        }
    }

    #[test]
    fn arc_tap_on_wrong_side_is_ignored() {
        let log = new_log();
        let mut arc_taps = vec![arc_tap(1.0, 1000, "right", &log)];

        resolve_taps(1000, &mut Vec::<LaneTapRequest<()>>::new(), &mut arc_taps, &[NoteSide::Left]);

        assert!(log.borrow().is_empty());
        assert_eq!(arc_taps.len(), 1);
    }

    #[test]
    fn one_resolution_per_pressed_side() {
        let log = new_log();
        let mut lane_taps = vec![lane_tap(1, 1000, "a", &log), lane_tap(2, 1001, "b", &log)];

        resolve_taps(1000, &mut lane_taps, &mut Vec::new(), &[NoteSide::Left]);

        assert_eq!(log.borrow().len(), 1);
        assert_eq!(lane_taps.len(), 1);
    }

    #[test]
    fn both_sides_resolve_independently() {
        let log = new_log();
        let mut lane_taps = vec![lane_tap(1, 1000, "left", &log), lane_tap(3, 1000, "right", &log)];

        resolve_taps(1000, &mut lane_taps, &mut Vec::new(), &[NoteSide::Left, NoteSide::Right]);

        assert_eq!(log.borrow().len(), 2);
        assert!(lane_taps.is_empty());
    }

    #[test]
    fn undefined_side_is_skipped() {
        let log = new_log();
        let mut lane_taps = vec![lane_tap(0, 1000, "unmapped", &log)];

        resolve_taps(1000, &mut lane_taps, &mut Vec::new(), &[NoteSide::Undefined]);

        assert!(log.borrow().is_empty());
        assert_eq!(lane_taps.len(), 1);
    }

    // =========================================================================
    // resolve_holds
    // =========================================================================

    #[test]
    fn hold_resolves_once_window_opens() {
        let log = new_log();
        let mut holds = vec![hold(1, 1000, 1200, "hold", &log)];

        resolve_holds(900, &mut holds, &[NoteSide::Left]);
        assert!(log.borrow().is_empty());

        resolve_holds(1000, &mut holds, &[NoteSide::Left]);
        assert_eq!(*log.borrow(), vec![("hold", false)]);
        assert!(holds.is_empty());
    }

    #[test]
    fn hold_past_expiry_reports_late() {
        let log = new_log();
        let mut holds = vec![hold(1, 1000, 1200, "hold", &log)];

        resolve_holds(1200, &mut holds, &[NoteSide::Left]);
        assert_eq!(*log.borrow(), vec![("hold", true)]);
    }

    #[test]
    fn all_eligible_holds_resolve_in_one_frame() {
        let log = new_log();
        let mut holds = vec![
            hold(1, 1000, 1500, "a", &log),
            hold(2, 1000, 1500, "b", &log),
            hold(3, 1000, 1500, "other-side", &log),
        ];

        resolve_holds(1100, &mut holds, &[NoteSide::Left]);

        assert_eq!(log.borrow().len(), 2);
        assert_eq!(holds.len(), 1);
    }

    #[test]
    fn resolve_holds_is_idempotent_within_a_frame() {
        let log = new_log();
        let mut holds = vec![hold(1, 1000, 1500, "a", &log), hold(2, 1000, 1500, "b", &log)];

        resolve_holds(1100, &mut holds, &[NoteSide::Left]);
        assert_eq!(log.borrow().len(), 2);

        // Everything eligible is gone; a second call resolves nothing more.
        resolve_holds(1100, &mut holds, &[NoteSide::Left]);
        assert_eq!(log.borrow().len(), 2);
        assert!(holds.is_empty());
    }
}
