//! Fixed-step time integrator for a single pendulum
//!
//! Semi-implicit Euler driven by an `AccelSet` and `Parameters`

use super::states::{Magnet, Pendulum};
use super::forces::AccelSet;
use super::params::Parameters;

/// Advance one pendulum by exactly one step of `params.time_step`
///
/// 1. every force term kicks the velocity, evaluated at the pre-step position
/// 2. drag: `v *= (1 - drag)^dt`
/// 3. drift with the updated velocity: `x += v * dt`
pub fn euler_step(p: &mut Pendulum, forces: &AccelSet, magnets: &[Magnet], params: &Parameters) {
    let dt = params.time_step;

    // Kick
    forces.accumulate_kicks(p, magnets, params);

    // Damp
    p.v *= params.drag_factor();

    // Drift: x_n+1 = x_n + dt v_n+1
    p.x += p.v * dt;
}

/// Run `steps` integrator steps and record every position, starting point included
pub fn trajectory(mut p: Pendulum, steps: usize, forces: &AccelSet, magnets: &[Magnet], params: &Parameters) -> Vec<Pendulum> {
    let mut out = Vec::with_capacity(steps + 1);
    out.push(p);
    for _ in 0..steps {
        euler_step(&mut p, forces, magnets, params);
        out.push(p);
    }
    out
}
