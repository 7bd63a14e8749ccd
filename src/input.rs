//! Input sampling: rotary encoder decode and button debounce.
//!
//! All input is sampled synchronously once per loop iteration and exposed as
//! an [`InputEvents`] value: instantaneous, edge-triggered flags valid for
//! that iteration only, never buffered across cycles. Both buttons use the
//! same time-based software debounce ([`crate::config::DEBOUNCE_MS`]).
//!
//! Rotation is decoded from the encoder's quadrature pair, not trusted as a
//! raw delta: a step is emitted on each channel-A falling edge, with channel
//! B's level at that moment giving the direction. Invalid transitions are
//! therefore impossible by construction.

use crate::config::DEBOUNCE_MS;

/// Edge-triggered input set for one loop iteration.
///
/// `rotation` is a signed detent count (usually -1/0/+1, but a fast spin can
/// accumulate more between samples in callers that batch deltas).
#[derive(Clone, Copy, Default, Debug)]
pub struct InputEvents {
    pub rotation: i32,
    pub confirm: bool,
    pub back: bool,
}

impl InputEvents {
    pub const fn none() -> Self {
        Self { rotation: 0, confirm: false, back: false }
    }
}

// =============================================================================
// Button Debounce
// =============================================================================

/// Button debounce state with time-based edge detection.
///
/// Buttons are active-low; `just_pressed` returns true only on an accepted
/// falling edge.
pub struct ButtonState {
    was_pressed: bool,
    last_change_ms: Option<u64>,
}

impl ButtonState {
    pub const fn new() -> Self {
        Self { was_pressed: false, last_change_ms: None }
    }

    /// Feed the current (active-low) level; true only on the falling edge,
    /// and only if the previous accepted edge is at least `DEBOUNCE_MS` old.
    pub fn just_pressed(&mut self, is_low: bool, now_ms: u64) -> bool {
        if is_low != self.was_pressed {
            if let Some(last) = self.last_change_ms
                && now_ms.saturating_sub(last) < DEBOUNCE_MS
            {
                return false;
            }
            self.was_pressed = is_low;
            self.last_change_ms = Some(now_ms);
            return is_low;
        }
        false
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Quadrature Encoder
// =============================================================================

/// Quadrature decoder for the rotary encoder.
///
/// Emits one signed step per channel-A falling edge; channel B high at that
/// moment means clockwise (+1), low means counter-clockwise (-1).
pub struct EncoderState {
    last_a: bool,
}

impl EncoderState {
    /// Idle lines are pulled high.
    pub const fn new() -> Self {
        Self { last_a: true }
    }

    /// Feed the current channel levels; returns the step for this sample.
    pub fn step(&mut self, a: bool, b: bool) -> i32 {
        let mut delta = 0;
        if a != self.last_a && !a {
            delta = if b { 1 } else { -1 };
        }
        self.last_a = a;
        delta
    }
}

impl Default for EncoderState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Sampler
// =============================================================================

/// Raw pin levels for one sample. Buttons are active-low.
#[derive(Clone, Copy, Debug)]
pub struct RawInputs {
    pub enc_a: bool,
    pub enc_b: bool,
    pub confirm_low: bool,
    pub back_low: bool,
}

/// Polls the encoder and both buttons and produces the per-cycle event set.
pub struct InputSampler {
    encoder: EncoderState,
    confirm: ButtonState,
    back: ButtonState,
}

impl InputSampler {
    pub const fn new() -> Self {
        Self {
            encoder: EncoderState::new(),
            confirm: ButtonState::new(),
            back: ButtonState::new(),
        }
    }

    pub fn update(&mut self, raw: RawInputs, now_ms: u64) -> InputEvents {
        InputEvents {
            rotation: self.encoder.step(raw.enc_a, raw.enc_b),
            confirm: self.confirm.just_pressed(raw.confirm_low, now_ms),
            back: self.back.just_pressed(raw.back_low, now_ms),
        }
    }
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_falling_edge_only() {
        let mut btn = ButtonState::new();
        assert!(btn.just_pressed(true, 0), "first falling edge should register");
        assert!(!btn.just_pressed(true, 200), "held button must not re-trigger");
        assert!(!btn.just_pressed(false, 400), "release is not a press");
        assert!(btn.just_pressed(true, 600), "next falling edge registers again");
    }

    #[test]
    fn test_button_debounce_rejects_bounce() {
        let mut btn = ButtonState::new();
        assert!(btn.just_pressed(true, 0));
        // Contact bounce within the debounce window: release + press again
        assert!(!btn.just_pressed(false, 20), "bounce release ignored");
        assert!(!btn.just_pressed(true, 40), "bounce press ignored");
        // State machine still thinks the button is held, so a real release
        // after the window is accepted, then a new press registers.
        assert!(!btn.just_pressed(false, 200));
        assert!(btn.just_pressed(true, 400));
    }

    #[test]
    fn test_encoder_clockwise_step() {
        let mut enc = EncoderState::new();
        // A falls while B is high -> +1
        assert_eq!(enc.step(false, true), 1);
        // A held low -> no further steps
        assert_eq!(enc.step(false, true), 0);
        // A rises -> no step on rising edge
        assert_eq!(enc.step(true, true), 0);
    }

    #[test]
    fn test_encoder_counter_clockwise_step() {
        let mut enc = EncoderState::new();
        assert_eq!(enc.step(false, false), -1);
        assert_eq!(enc.step(true, false), 0);
        assert_eq!(enc.step(false, false), -1);
    }

    #[test]
    fn test_sampler_produces_transient_events() {
        let mut sampler = InputSampler::new();
        let ev = sampler.update(
            RawInputs { enc_a: false, enc_b: true, confirm_low: true, back_low: false },
            0,
        );
        assert_eq!(ev.rotation, 1);
        assert!(ev.confirm);
        assert!(!ev.back);

        // Next cycle with unchanged levels: everything quiet again.
        let ev = sampler.update(
            RawInputs { enc_a: false, enc_b: true, confirm_low: true, back_low: false },
            20,
        );
        assert_eq!(ev.rotation, 0);
        assert!(!ev.confirm);
    }
}
