//! Force contributors for the pendulum integrator
//!
//! Defines the velocity-kick trait, the restoring pull of the string
//! toward the center of the plane, and the softened attraction of the
//! magnets sitting below the plane

use crate::simulation::params::Parameters;
use crate::simulation::states::{center, dist, Magnet, NVec2, Pendulum};

/// Ordered collection of force terms (restoring, magnets, ...)
/// Each term implements [`Acceleration`] and kicks the pendulum velocity in
/// turn, so registration order is evaluation order
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// The standard magnetic pendulum: string restoring force, then every magnet
    pub fn pendulum() -> Self {
        Self::new().with(Restoring).with(MagnetPull)
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Apply one step's worth of kicks from every term to `p.v`
    /// - forces are evaluated at `p.x`, which no term moves
    pub fn accumulate_kicks(&self, p: &mut Pendulum, magnets: &[Magnet], params: &Parameters) {
        let x = p.x;
        for term in &self.terms {
            term.kick(&x, &mut p.v, magnets, params);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::pendulum()
    }
}

/// Trait for force sources acting on a single pendulum
/// Implementations add `force * direction * dt` into `v`
pub trait Acceleration {
    fn kick(&self, x: &NVec2, v: &mut NVec2, magnets: &[Magnet], params: &Parameters);
}

/// Add a kick of signed magnitude `force` along the line from `from` to `x`
///
/// The angle is `atan2(dx, dy)`, measured from the +y ("down") axis, so the
/// x component takes `sin` and the y component takes `cos`. A negative
/// `force` pulls toward `from`.
fn radial_kick(from: &NVec2, x: &NVec2, force: f64, dt: f64, v: &mut NVec2) {
    let angle = (x.x - from.x).atan2(x.y - from.y);
    v.x += force * angle.sin() * dt;
    v.y += force * angle.cos() * dt;
}

/// Pull of the string toward the anchor at the center of the plane
///
/// Magnitude is `weight * distance / projection`, where `projection` is the
/// string's horizontal reach at full swing (`√2/2 · string_length`). This is
/// a fixed linear approximation, not a spherical pendulum.
pub struct Restoring;

impl Acceleration for Restoring {
    fn kick(&self, x: &NVec2, v: &mut NVec2, _magnets: &[Magnet], params: &Parameters) {
        let c = center();
        let force = -params.weight * dist(&c, x) / params.string_projection();
        radial_kick(&c, x, force, params.time_step, v);
    }
}

/// Attraction of every magnet, softened by `magnet_depth`
///
/// For planar distance `d` and depth `h`:
/// `-magnet_force / (d² + h²) · sin(atan(|d / h|))`.
/// The `sin(atan(..))` factor keeps only the in-plane component, and the
/// depth keeps the magnitude finite directly above a magnet.
pub struct MagnetPull;

impl Acceleration for MagnetPull {
    fn kick(&self, x: &NVec2, v: &mut NVec2, magnets: &[Magnet], params: &Parameters) {
        let h = params.magnet_depth;
        for m in magnets {
            let d = dist(&m.x, x);
            let force = -params.magnet_force / (d * d + h * h) * (d / h).abs().atan().sin();
            radial_kick(&m.x, x, force, params.time_step, v);
        }
    }
}
