//! Row-by-row fractal sweep over the output grid
//!
//! One independent pendulum is released per pixel, from the pixel center
//! mapped into `[0,1]²`. The sweep is a small state machine that computes one
//! row per [`Generator::step_row`] call and hands control back to the caller
//! in between, so a host loop can redraw, edit magnets, or cancel.
//!
//! Parameters are frozen when a sweep starts. Magnets are whatever slice the
//! caller passes for each row, so editing the registry mid-sweep shows up in
//! the rows computed after the edit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::simulation::color::{shade, Rgba, TRANSPARENT};
use crate::simulation::forces::AccelSet;
use crate::simulation::params::Parameters;
use crate::simulation::settle::{release, Outcome};
use crate::simulation::states::{Magnet, NVec2};

/// Largest accepted grid side in pixels
pub const MAX_GRID_SIDE: usize = 1 << 15;

/// Grid size for a display surface scaled by `resolution`
/// Fails when either side rounds to less than one pixel or exceeds [`MAX_GRID_SIDE`]
pub fn grid_dims(surface_width: f64, surface_height: f64, resolution: f64) -> Result<(usize, usize)> {
    let w = (surface_width * resolution).round();
    let h = (surface_height * resolution).round();
    let max = MAX_GRID_SIDE as f64;
    if !(w >= 1.0 && h >= 1.0 && w <= max && h <= max) {
        return Err(Error::InvalidGeometry {
            width: w as i64,
            height: h as i64,
        });
    }
    Ok((w as usize, h as usize))
}

/// Row-major RGBA grid. Unwritten pixels are fully transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl OutputBuffer {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let invalid = Error::InvalidGeometry {
            width: i64::try_from(width).unwrap_or(i64::MAX),
            height: i64::try_from(height).unwrap_or(i64::MAX),
        };
        if width == 0 || height == 0 || width > MAX_GRID_SIDE || height > MAX_GRID_SIDE {
            return Err(invalid);
        }
        let len = width.checked_mul(height).and_then(|n| n.checked_mul(4)).ok_or(invalid)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        let o = (x + y * self.width) * 4;
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, px: Rgba) {
        let o = (x + y * self.width) * 4;
        self.data[o..o + 4].copy_from_slice(&px);
    }

    /// Raw bytes of row `y`
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * 4;
        &self.data[y * stride..(y + 1) * stride]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Shared "sweep running" flag
/// Clearing any clone cancels the sweep at its next row boundary
#[derive(Debug, Clone, Default)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenState {
    Idle,
    Running { row: usize }, // next row to compute
    CancelRequested,
}

/// Result of one scheduling step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Row(usize), // row just written, more to come
    Done,
    Cancelled,
    Idle, // nothing was running
}

/// Per-sweep capture counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub captured: Vec<usize>, // pixels per magnet index
    pub open: usize,          // settled away from every magnet
    pub unsettled: usize,     // ran out of steps
}

impl Tally {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Settled { magnet: Some(k), .. } => {
                if self.captured.len() <= *k {
                    self.captured.resize(k + 1, 0);
                }
                self.captured[*k] += 1;
            }
            Outcome::Settled { magnet: None, .. } => self.open += 1,
            Outcome::Unsettled { .. } => self.unsettled += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.captured.iter().sum::<usize>() + self.open + self.unsettled
    }
}

/// Color of the pixel at `(px, py)` on a `width x height` grid
pub fn render_pixel(px: usize, py: usize, width: usize, height: usize, forces: &AccelSet, magnets: &[Magnet], params: &Parameters) -> Rgba {
    let start = pixel_center(px, py, width, height);
    pixel_color(&release(start, forces, magnets, params), magnets, params)
}

/// Pixel center mapped into the unit square
pub fn pixel_center(px: usize, py: usize, width: usize, height: usize) -> NVec2 {
    NVec2::new((px as f64 + 0.5) / width as f64, (py as f64 + 0.5) / height as f64)
}

fn pixel_color(outcome: &Outcome, magnets: &[Magnet], params: &Parameters) -> Rgba {
    match outcome {
        Outcome::Settled { step, magnet: Some(k), .. } => shade(magnets[*k].color, *step, params.max_steps),
        _ => TRANSPARENT,
    }
}

/// Cancellable sweep driver. At most one sweep is active at a time.
pub struct Generator {
    buffer: OutputBuffer,
    state: GenState,
    running: RunFlag,
    params: Parameters,
    forces: AccelSet,
    tally: Tally,
}

impl Generator {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            buffer: OutputBuffer::new(width, height)?,
            state: GenState::Idle,
            running: RunFlag::new(),
            params: Parameters::default(),
            forces: AccelSet::pendulum(),
            tally: Tally::default(),
        })
    }

    /// Generator sized for a display surface at `resolution`
    pub fn for_surface(surface_width: f64, surface_height: f64, resolution: f64) -> Result<Self> {
        let (w, h) = grid_dims(surface_width, surface_height, resolution)?;
        Self::new(w, h)
    }

    pub fn buffer(&self) -> &OutputBuffer {
        &self.buffer
    }

    pub fn state(&self) -> GenState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, GenState::Running { .. })
    }

    /// Handle that can cancel the sweep from outside
    pub fn run_flag(&self) -> RunFlag {
        self.running.clone()
    }

    /// Parameters of the current (or last) sweep
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Reallocate the grid, discarding its contents and stopping any sweep.
    /// A non-positive size is rejected and leaves everything as it was.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        let buffer = OutputBuffer::new(width, height).map_err(|e| {
            warn!("rejected grid resize: {}", e);
            e
        })?;
        self.halt();
        self.buffer = buffer;
        debug!("grid reallocated to {}x{}", width, height);
        Ok(())
    }

    /// Start a sweep, or request cancellation if one is running.
    /// Returns true if a sweep was started.
    pub fn toggle(&mut self, params: &Parameters) -> bool {
        if self.is_running() {
            self.cancel();
            false
        } else {
            self.start(params);
            true
        }
    }

    /// Begin a fresh sweep from row 0 with a frozen copy of `params`.
    /// Rows are overwritten as they are reached; the buffer is not cleared.
    pub fn start(&mut self, params: &Parameters) {
        self.params = *params;
        self.tally = Tally::default();
        self.state = GenState::Running { row: 0 };
        self.running.set();
        info!(
            "sweep started: {}x{} grid, max_steps {}",
            self.buffer.width, self.buffer.height, self.params.max_steps
        );
    }

    /// Ask the running sweep to stop. Observed at the next row boundary.
    pub fn cancel(&mut self) {
        if self.is_running() {
            self.state = GenState::CancelRequested;
        }
        self.running.clear();
    }

    fn halt(&mut self) {
        self.state = GenState::Idle;
        self.running.clear();
    }

    /// Compute the next row, then yield.
    pub fn step_row(&mut self, magnets: &[Magnet]) -> Progress {
        let row = match self.state {
            GenState::Idle => return Progress::Idle,
            GenState::CancelRequested => return self.cancelled(),
            GenState::Running { row } => row,
        };
        if !self.running.is_set() {
            return self.cancelled();
        }

        self.render_row(row, magnets);
        debug!("row {}/{} done", row + 1, self.buffer.height);

        let next = row + 1;
        if next >= self.buffer.height {
            self.halt();
            info!("sweep finished: {:?}", self.tally);
            return Progress::Done;
        }
        if !self.running.is_set() {
            return self.cancelled();
        }
        self.state = GenState::Running { row: next };
        Progress::Row(row)
    }

    /// Compute up to `rows` rows (at least one), stopping early when the sweep ends
    pub fn run_rows(&mut self, rows: usize, magnets: &[Magnet]) -> Progress {
        let mut progress = self.step_row(magnets);
        for _ in 1..rows {
            if !matches!(progress, Progress::Row(_)) {
                break;
            }
            progress = self.step_row(magnets);
        }
        progress
    }

    fn cancelled(&mut self) -> Progress {
        self.halt();
        info!("sweep cancelled after {} pixels", self.tally.total());
        Progress::Cancelled
    }

    fn render_row(&mut self, y: usize, magnets: &[Magnet]) {
        let (w, h) = (self.buffer.width, self.buffer.height);
        for x in 0..w {
            let outcome = release(pixel_center(x, y, w, h), &self.forces, magnets, &self.params);
            self.tally.record(&outcome);
            let px = pixel_color(&outcome, magnets, &self.params);
            self.buffer.set_pixel(x, y, px);
        }
    }
}
