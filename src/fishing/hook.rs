// Rod and hook tracking.

use crate::config::Playfield;

/// Latest player input, written by event handlers between frames and read
/// once at the top of each frame. Round state is never touched from here.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer x in playfield units, if the pointer moved since the last frame.
    pub pointer_x: Option<f64>,
    /// Button / touch held.
    pub lowering: bool,
}

/// Map a client-space pointer coordinate onto the playfield, clamped to its
/// width. `rect_left`/`rect_width` describe the canvas box on the page.
pub fn pointer_to_playfield(client_x: f64, rect_left: f64, rect_width: f64, playfield: &Playfield) -> f64 {
    if rect_width <= 0.0 {
        return playfield.width / 2.0;
    }
    ((client_x - rect_left) / rect_width * playfield.width).clamp(0.0, playfield.width)
}

#[derive(Clone, Debug, PartialEq)]
pub struct HookTracker {
    rod_x: f64,
    depth: f64,
    max_depth: f64,
    step: f64,
}

impl HookTracker {
    pub fn new(playfield: &Playfield, step: f64) -> Self {
        Self {
            rod_x: playfield.width / 2.0,
            depth: 0.0,
            max_depth: playfield.max_hook_depth(),
            step,
        }
    }

    pub fn rod_x(&self) -> f64 {
        self.rod_x
    }

    /// A fresh tracker with the hook raised and the rod left where the
    /// pointer last put it.
    pub fn raised(&self, playfield: &Playfield, step: f64) -> Self {
        Self {
            rod_x: self.rod_x.clamp(0.0, playfield.width),
            ..Self::new(playfield, step)
        }
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn max_depth(&self) -> f64 {
        self.max_depth
    }

    /// Apply one frame of input. Rod x follows the pointer with no smoothing;
    /// depth eases by one step and stays in `[0, max_depth]`.
    pub fn update(&mut self, input: &FrameInput) {
        if let Some(x) = input.pointer_x {
            self.rod_x = x;
        }
        let next = if input.lowering {
            self.depth + self.step
        } else {
            self.depth - self.step
        };
        self.depth = next.clamp(0.0, self.max_depth);
    }

    /// World position of the hook point.
    pub fn position(&self, waterline: f64) -> (f64, f64) {
        (self.rod_x, waterline + self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowering(on: bool) -> FrameInput {
        FrameInput {
            pointer_x: None,
            lowering: on,
        }
    }

    #[test]
    fn starts_centered_at_surface() {
        let hook = HookTracker::new(&Playfield::default(), 6.0);
        assert_eq!(hook.rod_x(), 450.0);
        assert_eq!(hook.position(120.0), (450.0, 120.0));
    }

    #[test]
    fn depth_stays_within_bounds() {
        let pf = Playfield::default();
        let mut hook = HookTracker::new(&pf, 6.0);
        for _ in 0..500 {
            hook.update(&lowering(true));
            assert!(hook.depth() <= hook.max_depth());
        }
        assert_eq!(hook.depth(), 440.0);
        for _ in 0..500 {
            hook.update(&lowering(false));
            assert!(hook.depth() >= 0.0);
        }
        assert_eq!(hook.depth(), 0.0);
    }

    #[test]
    fn depth_moves_one_step_per_frame() {
        let mut hook = HookTracker::new(&Playfield::default(), 6.0);
        hook.update(&lowering(true));
        hook.update(&lowering(true));
        assert_eq!(hook.depth(), 12.0);
        hook.update(&lowering(false));
        assert_eq!(hook.depth(), 6.0);
    }

    #[test]
    fn rod_follows_pointer_directly() {
        let mut hook = HookTracker::new(&Playfield::default(), 6.0);
        hook.update(&FrameInput {
            pointer_x: Some(12.5),
            lowering: false,
        });
        assert_eq!(hook.rod_x(), 12.5);
        // No new pointer sample keeps the rod where it was.
        hook.update(&lowering(false));
        assert_eq!(hook.rod_x(), 12.5);
    }

    #[test]
    fn raising_keeps_rod_and_clears_depth() {
        let pf = Playfield::default();
        let mut hook = HookTracker::new(&pf, 6.0);
        hook.update(&FrameInput {
            pointer_x: Some(200.0),
            lowering: true,
        });
        let raised = hook.raised(&pf, 6.0);
        assert_eq!(raised.rod_x(), 200.0);
        assert_eq!(raised.depth(), 0.0);
    }

    #[test]
    fn pointer_mapping_scales_and_clamps() {
        let pf = Playfield::default();
        // Canvas drawn at half size, 100px from the page edge.
        assert_eq!(pointer_to_playfield(325.0, 100.0, 450.0, &pf), 450.0);
        assert_eq!(pointer_to_playfield(0.0, 100.0, 450.0, &pf), 0.0);
        assert_eq!(pointer_to_playfield(9_999.0, 100.0, 450.0, &pf), 900.0);
        assert_eq!(pointer_to_playfield(10.0, 0.0, 0.0, &pf), 450.0);
    }
}
