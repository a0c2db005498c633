//! Settling detection for a released pendulum
//!
//! A pendulum is at rest once its squared speed has stayed below
//! [`REST_SPEED2`] for [`SLEEP_STEPS`] consecutive steps. A single slow
//! step is not enough: pendulums pass slowly through turning points and
//! between magnets all the time.

use log::trace;

use crate::simulation::forces::AccelSet;
use crate::simulation::integrator::euler_step;
use crate::simulation::params::Parameters;
use crate::simulation::states::{dist, Magnet, NVec2, Pendulum};

/// Consecutive low-speed steps needed to confirm rest
pub const SLEEP_STEPS: usize = 200;
/// Squared speed below which a step counts as low-speed
pub const REST_SPEED2: f64 = 0.001;
/// A resting pendulum is attributed to a magnet only strictly inside this distance
pub const CAPTURE_RADIUS: f64 = 0.1;

/// How a single release ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Came to rest; `step` is the 0-based index of the step that confirmed
    /// it, so the earliest possible value is `SLEEP_STEPS - 1`. `magnet`
    /// indexes the magnet slice the run was given, `None` in open space.
    Settled { step: usize, magnet: Option<usize>, at: NVec2 },
    /// Step budget ran out first. `steps` is the full budget.
    Unsettled { steps: usize },
}

impl Outcome {
    pub fn magnet(&self) -> Option<usize> {
        match self {
            Outcome::Settled { magnet, .. } => *magnet,
            Outcome::Unsettled { .. } => None,
        }
    }

    /// Confirming step index, or the full budget when unsettled
    pub fn steps(&self) -> usize {
        match self {
            Outcome::Settled { step, .. } => *step,
            Outcome::Unsettled { steps } => *steps,
        }
    }
}

/// Counts consecutive low-speed steps
#[derive(Debug, Clone, Default)]
pub struct SettleDetector {
    calm: usize,
}

impl SettleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the state after one step. Returns true once rest is confirmed.
    pub fn observe(&mut self, p: &Pendulum) -> bool {
        if p.speed2() < REST_SPEED2 {
            self.calm += 1;
        } else {
            self.calm = 0;
        }
        self.calm >= SLEEP_STEPS
    }

    pub fn calm_steps(&self) -> usize {
        self.calm
    }
}

/// Index of the closest magnet strictly within [`CAPTURE_RADIUS`] of `x`
/// Ties go to the earlier magnet
pub fn nearest_magnet(x: &NVec2, magnets: &[Magnet]) -> Option<usize> {
    let mut best = None;
    let mut min_dist = CAPTURE_RADIUS;
    for (i, m) in magnets.iter().enumerate() {
        let d = dist(&m.x, x);
        if d < min_dist {
            min_dist = d;
            best = Some(i);
        }
    }
    best
}

/// Release a pendulum at `start` with zero velocity and integrate until it
/// settles or `params.max_steps` runs out
pub fn release(start: NVec2, forces: &AccelSet, magnets: &[Magnet], params: &Parameters) -> Outcome {
    let mut p = Pendulum::at_rest(start);
    let mut detector = SettleDetector::new();

    for i in 0..params.max_steps {
        euler_step(&mut p, forces, magnets, params);

        if detector.observe(&p) {
            let magnet = nearest_magnet(&p.x, magnets);
            trace!("released at {:?}: settled at step {} near {:?}", start, i, magnet);
            return Outcome::Settled {
                step: i,
                magnet,
                at: p.x,
            };
        }
    }

    Outcome::Unsettled {
        steps: params.max_steps,
    }
}
