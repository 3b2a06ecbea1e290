// Background scroll stepper. One plan at a time, advanced once per tick.
use thiserror::Error;

use crate::model::{Direction, Offset};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrollError {
    #[error("scroll already in progress ({remaining} steps remaining)")]
    Busy { remaining: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollPlan {
    /// Per-axis magnitude of the requested displacement.
    pub total: Offset,
    pub direction: Direction,
    pub increment: Offset,
    pub steps: u32,
    pub ticks: u32,
}

impl ScrollPlan {
    pub fn steps_remaining(&self) -> u32 {
        self.steps - self.ticks
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No plan active, nothing moved.
    Idle,
    Stepped(Offset),
    /// Final step applied; the plan is gone.
    Completed(Offset),
}

#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    offset: Offset,
    plan: Option<ScrollPlan>,
}

impl ScrollAnimator {
    /// Current background position.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn plan(&self) -> Option<&ScrollPlan> {
        self.plan.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.plan.is_some()
    }

    /// Start shifting the background by `total` in `steps` ticks. A zero step
    /// count falls back to `default_steps` (the sprite speed).
    pub fn animate(
        &mut self,
        total: Offset,
        direction: Direction,
        steps: u32,
        default_steps: u32,
    ) -> Result<(), ScrollError> {
        if let Some(plan) = &self.plan {
            return Err(ScrollError::Busy {
                remaining: plan.steps_remaining(),
            });
        }
        let steps = if steps == 0 { default_steps.max(1) } else { steps };
        let total = Offset::new(total.x.abs(), total.y.abs());
        let increment = Offset::new(total.x / steps as i64, total.y / steps as i64);
        self.plan = Some(ScrollPlan {
            total,
            direction,
            increment,
            steps,
            ticks: 0,
        });
        Ok(())
    }

    pub fn tick(&mut self) -> Tick {
        let Some(plan) = self.plan.as_mut() else {
            return Tick::Idle;
        };
        self.offset.x += plan.increment.x * plan.direction.x as i64;
        self.offset.y += plan.increment.y * plan.direction.y as i64;
        plan.ticks += 1;
        if plan.ticks >= plan.steps {
            self.plan = None;
            Tick::Completed(self.offset)
        } else {
            Tick::Stepped(self.offset)
        }
    }
}
