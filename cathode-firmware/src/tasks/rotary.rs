//! Rotary encoder edge task
//!
//! The pin-change ISR of the original design, rendered as a task that
//! sleeps on the B channels of both encoders. On any B edge, both
//! decoders get the current channel levels; each one counts only if its
//! own B input actually changed.

use embassy_futures::select::select;
use embassy_rp::gpio::Input;

use crate::shared::{LEFT_ENCODER, RIGHT_ENCODER};

#[embassy_executor::task]
pub async fn rotary_task(
    left_a: Input<'static>,
    mut left_b: Input<'static>,
    right_a: Input<'static>,
    mut right_b: Input<'static>,
) {
    loop {
        {
            let left_edge = left_b.wait_for_any_edge();
            let right_edge = right_b.wait_for_any_edge();
            select(left_edge, right_edge).await;
        }

        let (la, lb) = (left_a.is_high(), left_b.is_high());
        let (ra, rb) = (right_a.is_high(), right_b.is_high());

        LEFT_ENCODER.lock(|e| e.borrow_mut().update(la, lb));
        RIGHT_ENCODER.lock(|e| e.borrow_mut().update(ra, rb));
    }
}
