use std::rc::Rc;

use crate::config::JudgeTuning;
use crate::input::{InputFrame, JoystickState};
use crate::judge::color_lock::ColorLockRegistry;
use crate::model::arc::{ArcGeometry, connected_loosely};
use crate::model::{ArcRequest, SustainJudgement, Timing};
use crate::traits::feedback::InputFeedback;
use crate::util::math::angle_deviation;

/// Match this frame's joystick state against pending arc requests.
///
/// Runs the whole queue every frame: each started request is judged
/// directionally against the stick assigned to its color, with continuity
/// correction and the misinput lock applied per color channel. Accepted
/// requests resolve and leave the queue; rejected ones stay for the next
/// frame. Ends by pushing every channel's red value to the feedback sink.
///
/// `lock_duration` maps an arc's judgement tick interval to the length of
/// the forced-rejection window after a confirmed misinput.
pub fn resolve_arcs<P>(
    current_timing: Timing,
    requests: &mut Vec<ArcRequest<P>>,
    frame: &InputFrame,
    locks: &mut ColorLockRegistry,
    tuning: &JudgeTuning,
    lock_duration: &dyn Fn(f32) -> Timing,
    feedback: &mut dyn InputFeedback,
) {
    locks.new_frame(current_timing);

    // A channel whose color has no arc in judgement range holds no grudge:
    // drop any pending lock before matching.
    for color in 0..locks.channel_count() as i32 {
        let in_range = requests.iter().any(|request| {
            current_timing >= request.start_at_timing
                && current_timing <= request.arc.end_timing()
                && request.arc.color() == color
        });
        if !in_range {
            locks.get(color).unlock();
        }
    }

    let mut i = requests.len();
    while i > 0 {
        i -= 1;
        if current_timing < requests[i].start_at_timing {
            continue;
        }

        let accepted = match frame.stick_for_color(requests[i].arc.color()) {
            // Colors beyond the two physical sticks are not judged
            // directionally at all.
            None => true,
            Some(stick) => {
                let arc = &requests[i].arc;
                match direction_judge(current_timing, stick, arc, locks, tuning, lock_duration) {
                    // No tangent at this timestamp: not resolvable this frame.
                    None => continue,
                    Some(accepted) => accepted,
                }
            }
        };

        if accepted {
            let request = requests.swap_remove(i);
            (request.receiver)(
                SustainJudgement {
                    is_late: current_timing >= request.expire_at_timing,
                    is_judgement: request.is_judgement,
                },
                request.properties,
            );
        }
    }

    locks.apply_red_values(feedback);
}

/// Directional judgement of one arc against its stick.
///
/// Returns `None` when the arc has no tangent at `current_timing`, otherwise
/// the final acceptance after continuity correction. Updates the channel's
/// continuity pair for every computed judgement and arms the misinput lock
/// when a wrong-direction input is confirmed.
fn direction_judge(
    current_timing: Timing,
    stick: JoystickState,
    arc: &Rc<dyn ArcGeometry>,
    locks: &mut ColorLockRegistry,
    tuning: &JudgeTuning,
    lock_duration: &dyn Fn(f32) -> Timing,
) -> Option<bool> {
    let segment = arc.segment_at(current_timing)?;

    // Stationary arcs and degenerate tangents ask for no direction.
    let cap_angle = match segment.cap_angle() {
        Some(angle) if !arc.is_stationary() => angle,
        _ => return Some(true),
    };

    let color = arc.color();
    let frame_timing = locks.frame_timing();
    let mut accepted = false;

    if let Some(input_angle) = stick.direction_angle(tuning.joystick_sensitivity) {
        let deviation = angle_deviation(input_angle, cap_angle);
        accepted =
            deviation < tuning.judgement_threshold && !locks.get(color).is_locked(frame_timing);

        if !accepted {
            if let Some((previous_arc, previous_accepted)) = locks.get(color).previous_judgement() {
                if connected_loosely(previous_arc.as_ref(), arc.as_ref()) {
                    if previous_accepted {
                        // A sharp tangent change right at the stitch point is
                        // stick noise, not a direction change: inherit the
                        // previous accept.
                        let stitch_turn = previous_arc
                            .segment_at(previous_arc.end_timing())
                            .and_then(|segment| segment.cap_angle())
                            .map(|previous_cap| angle_deviation(cap_angle, previous_cap));
                        if stitch_turn.is_some_and(|turn| turn > tuning.active_correction_threshold)
                        {
                            accepted = true;
                        }
                    } else if deviation > 180.0 - tuning.judgement_threshold {
                        // Nearly opposite input right after a rejected arc
                        // confirms the misinput.
                        locks.lock(color, lock_duration(arc.time_increment()));
                    }
                }
            }
        }
    }

    locks.get(color).record_judgement(Rc::clone(arc), accepted);
    Some(accepted)
}
