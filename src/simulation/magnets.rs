//! Ordered set of magnets with derived colors
//!
//! Colors depend on position in the registry: the k-th of N magnets gets hue
//! k/N. Every membership change recolors the whole set, so adding or removing
//! one magnet can change the color of all the others.

use log::debug;

use crate::simulation::color::magnet_hue;
use crate::simulation::states::{dist, Magnet, NVec2, Rgb};

/// A placement request this close to an existing magnet removes it
pub const PICK_RADIUS: f64 = 0.01;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MagnetRegistry {
    magnets: Vec<Magnet>,
}

impl MagnetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `positions` in order
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = NVec2>,
    {
        let mut reg = Self {
            magnets: positions
                .into_iter()
                .map(|x| Magnet { x, color: Rgb::default() })
                .collect(),
        };
        reg.recolor();
        reg
    }

    /// Read-only view used by the engine
    pub fn snapshot(&self) -> &[Magnet] {
        &self.magnets
    }

    pub fn len(&self) -> usize {
        self.magnets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnets.is_empty()
    }

    pub fn add(&mut self, x: NVec2) {
        self.magnets.push(Magnet { x, color: Rgb::default() });
        self.recolor();
    }

    pub fn remove(&mut self, index: usize) -> Option<Magnet> {
        if index >= self.magnets.len() {
            return None;
        }
        let removed = self.magnets.remove(index);
        self.recolor();
        Some(removed)
    }

    /// Remove the first magnet within [`PICK_RADIUS`] of `x`, else add one there.
    /// Returns true if a magnet was added.
    pub fn toggle_at(&mut self, x: NVec2) -> bool {
        match self.magnets.iter().position(|m| dist(&m.x, &x) < PICK_RADIUS) {
            Some(i) => {
                self.remove(i);
                debug!("removed magnet {} at {:?}, {} left", i, x, self.len());
                false
            }
            None => {
                self.add(x);
                debug!("added magnet at {:?}, {} total", x, self.len());
                true
            }
        }
    }

    /// Spread hues evenly over all magnets in registry order
    pub fn recolor(&mut self) {
        let n = self.magnets.len();
        for (k, m) in self.magnets.iter_mut().enumerate() {
            m.color = magnet_hue(k, n);
        }
    }
}
