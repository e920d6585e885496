/// Per-tick fold scheduler owned by the presentation layer
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fold::FoldProgress;

/// Progress added or removed on every tick.
pub const FOLD_STEP: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldDirection {
    /// Towards the flat net (progress 1).
    Unfold,
    /// Towards the closed box (progress 0).
    Fold,
}

impl FoldDirection {
    fn sign(self) -> f32 {
        match self {
            Self::Unfold => 1.0,
            Self::Fold => -1.0,
        }
    }

    fn bound(self) -> FoldProgress {
        match self {
            Self::Unfold => FoldProgress::FLAT,
            Self::Fold => FoldProgress::CLOSED,
        }
    }
}

/// Moves progress a fixed step per tick until it reaches the bound it is
/// heading for, then stops itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldAnimator {
    direction: Option<FoldDirection>,
    step: f32,
}

impl FoldAnimator {
    pub fn new() -> Self {
        Self::with_step(FOLD_STEP)
    }

    pub fn with_step(step: f32) -> Self {
        Self {
            direction: None,
            step: step.abs(),
        }
    }

    pub fn play(&mut self, direction: FoldDirection) {
        self.direction = Some(direction);
    }

    pub fn stop(&mut self) {
        self.direction = None;
    }

    pub fn is_playing(&self) -> bool {
        self.direction.is_some()
    }

    pub fn direction(&self) -> Option<FoldDirection> {
        self.direction
    }

    /// Advance one step. Returns the progress unchanged when stopped.
    pub fn tick(&mut self, progress: FoldProgress) -> FoldProgress {
        let Some(direction) = self.direction else {
            return progress;
        };

        let next = FoldProgress::new(progress.value() + direction.sign() * self.step);
        if next == direction.bound() {
            debug!(?direction, "fold animation reached its bound");
            self.direction = None;
        }
        next
    }
}

impl Default for FoldAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_idle_animator_leaves_progress() {
        let mut animator = FoldAnimator::new();
        assert!(!animator.is_playing());
        assert_eq!(animator.tick(FoldProgress::HALF), FoldProgress::HALF);
    }

    #[test]
    fn test_single_step() {
        let mut animator = FoldAnimator::new();
        animator.play(FoldDirection::Unfold);
        let next = animator.tick(FoldProgress::HALF);
        assert_relative_eq!(next.value(), 0.51);
        assert!(animator.is_playing());

        animator.play(FoldDirection::Fold);
        assert_relative_eq!(animator.tick(next).value(), 0.5);
    }

    #[test]
    fn test_unfold_saturates_and_halts() {
        let mut animator = FoldAnimator::new();
        animator.play(FoldDirection::Unfold);
        let mut progress = FoldProgress::HALF;
        let mut ticks = 0;
        while animator.is_playing() {
            progress = animator.tick(progress);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(progress, FoldProgress::FLAT);
        assert!((49..=51).contains(&ticks));

        // Further ticks are no-ops.
        assert_eq!(animator.tick(progress), FoldProgress::FLAT);
    }

    #[test]
    fn test_fold_from_closed_halts_immediately() {
        let mut animator = FoldAnimator::new();
        animator.play(FoldDirection::Fold);
        assert_eq!(animator.tick(FoldProgress::CLOSED), FoldProgress::CLOSED);
        assert!(!animator.is_playing());
    }

    #[test]
    fn test_stop_cancels() {
        let mut animator = FoldAnimator::with_step(0.25);
        animator.play(FoldDirection::Fold);
        let p = animator.tick(FoldProgress::FLAT);
        assert_eq!(p.value(), 0.75);
        animator.stop();
        assert_eq!(animator.tick(p), p);
        assert_eq!(animator.direction(), None);
    }
}
