//! Crossfade animation between display buffers
//!
//! The active buffer is morphed toward a target buffer one intensity step
//! per PWM cycle: segments lit in the target fade up to the target level,
//! segments dark in the target fade down to off. A segment that is already
//! brighter than a nonzero target is left alone.
//!
//! Mutations only happen between PWM cycles: the session arms the refresh
//! engine's single-cycle mode, waits for the cycle-complete flag, adjusts,
//! and re-enables refresh. The session is poll-driven so the algorithm can
//! be exercised deterministically; the application simply polls it to
//! completion, which for a full on/off swing takes
//! `MAX_INTENSITY * (rate + 1)` PWM cycles.

use super::buffer::SegmentBuffer;
use super::layout::{MAX_CROSSFADE_RATE, SEGMENTS};
use super::refresh::RefreshControl;

/// An in-progress crossfade toward a target buffer
pub struct Crossfade<'a> {
    target: &'a SegmentBuffer,
    skip: u8,
}

impl<'a> Crossfade<'a> {
    /// Begin crossfading the active buffer toward `target`
    ///
    /// Arms single-cycle refresh; the first completed PWM cycle adjusts
    /// immediately, rate throttling applies between subsequent steps.
    pub fn start(ctrl: &RefreshControl, target: &'a SegmentBuffer) -> Self {
        ctrl.arm_single_cycle();
        Self {
            target,
            skip: MAX_CROSSFADE_RATE,
        }
    }

    /// Advance the fade if a PWM cycle has completed
    ///
    /// Returns `true` once the active buffer has reached the target state
    /// and normal refresh has been restored. Call repeatedly from the
    /// application context; the refresh engine keeps running in the tick
    /// between polls.
    pub fn poll(&mut self, ctrl: &RefreshControl, active: &SegmentBuffer) -> bool {
        if !ctrl.take_cycle_done() {
            return false;
        }

        // Rate throttle: let `rate` PWM cycles pass between adjustments
        if self.skip < ctrl.crossfade_rate() {
            self.skip += 1;
            ctrl.resume();
            return false;
        }
        self.skip = 0;

        let mut activity = false;
        for index in 0..SEGMENTS {
            let to = self.target.get(index);
            let from = active.get(index);
            if to > 0 {
                if from < to {
                    active.set(index, from + 1);
                    activity = true;
                }
            } else if from > 0 {
                active.set(index, from - 1);
                activity = true;
            }
        }

        if activity {
            ctrl.resume();
            false
        } else {
            // Converged: leave single-cycle mode, refresh free-runs again
            ctrl.disarm_single_cycle();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::layout::MAX_INTENSITY;
    use crate::display::refresh::test_bus::RecordingBus;
    use crate::display::refresh::RefreshEngine;

    /// Run refresh ticks and fade polls interleaved until the fade
    /// completes; returns the number of PWM cycles consumed.
    fn run_fade(
        ctrl: &RefreshControl,
        active: &SegmentBuffer,
        target: &SegmentBuffer,
        rate: u8,
    ) -> u32 {
        ctrl.set_crossfade_rate(rate);
        let mut engine = RefreshEngine::new();
        let mut bus = RecordingBus::new();
        let mut fade = Crossfade::start(ctrl, target);

        for _ in 0..100_000 {
            engine.step(ctrl, active, &mut bus).unwrap();
            if fade.poll(ctrl, active) {
                return (bus.frames.len() / MAX_INTENSITY as usize) as u32;
            }
        }
        panic!("crossfade did not converge");
    }

    #[test]
    fn test_full_swap_converges_within_bound() {
        for rate in 0..=MAX_CROSSFADE_RATE {
            let active = SegmentBuffer::new();
            let target = SegmentBuffer::new();
            for index in 0..SEGMENTS {
                active.set(index, MAX_INTENSITY);
            }

            let ctrl = RefreshControl::new();
            let cycles = run_fade(&ctrl, &active, &target, rate);

            assert_eq!(active.snapshot(), [0u8; SEGMENTS], "rate {}", rate);
            // All segments hit zero within MAX_INTENSITY * (rate + 1)
            // cycles; detecting convergence costs one more pass
            let bound = MAX_INTENSITY as u32 * (rate as u32 + 1) + 1;
            assert!(cycles <= bound, "rate {}: {} > {}", rate, cycles, bound);
            assert!(ctrl.is_enabled());
        }
    }

    #[test]
    fn test_fade_up_to_target_levels() {
        let active = SegmentBuffer::new();
        let target = SegmentBuffer::new();
        target.set(3, 7);
        target.set(40, 2);

        let ctrl = RefreshControl::new();
        run_fade(&ctrl, &active, &target, 0);

        assert_eq!(active.get(3), 7);
        assert_eq!(active.get(40), 2);
        assert_eq!(active.get(0), 0);
    }

    #[test]
    fn test_brighter_segment_is_not_pulled_down() {
        let active = SegmentBuffer::new();
        let target = SegmentBuffer::new();
        active.set(10, 9);
        target.set(10, 4);

        let ctrl = RefreshControl::new();
        run_fade(&ctrl, &active, &target, 0);

        // Nonzero target below the active level leaves the segment alone
        assert_eq!(active.get(10), 9);
    }

    #[test]
    fn test_adjustments_happen_at_cycle_boundaries() {
        let active = SegmentBuffer::new();
        let target = SegmentBuffer::new();
        active.set(0, 2);

        let ctrl = RefreshControl::new();
        ctrl.set_crossfade_rate(0);
        let mut engine = RefreshEngine::new();
        let mut bus = RecordingBus::new();
        let mut fade = Crossfade::start(&ctrl, &target);

        // Mid-cycle polls do nothing
        for _ in 0..MAX_INTENSITY - 1 {
            engine.step(&ctrl, &active, &mut bus).unwrap();
            assert!(!fade.poll(&ctrl, &active));
            assert_eq!(active.get(0), 2);
        }
        engine.step(&ctrl, &active, &mut bus).unwrap();
        assert!(!fade.poll(&ctrl, &active));
        assert_eq!(active.get(0), 1);
    }

    #[test]
    fn test_rate_throttle_skips_cycles() {
        let active = SegmentBuffer::new();
        let target = SegmentBuffer::new();
        for index in 0..SEGMENTS {
            active.set(index, MAX_INTENSITY);
        }

        let fast = {
            let ctrl = RefreshControl::new();
            let a = SegmentBuffer::new();
            for index in 0..SEGMENTS {
                a.set(index, MAX_INTENSITY);
            }
            run_fade(&ctrl, &a, &target, 0)
        };
        let slow = {
            let ctrl = RefreshControl::new();
            run_fade(&ctrl, &active, &target, MAX_CROSSFADE_RATE)
        };
        assert!(slow > fast, "slow {} fast {}", slow, fast);
    }
}
