//! High-level runtime scheduling settings
//!
//! Controls how much sweep work a host does per tick before yielding

#[derive(Debug, Clone)]
pub struct Engine {
    pub rows_per_tick: usize, // rows computed before handing control back
}

impl Default for Engine {
    fn default() -> Self {
        Self { rows_per_tick: 1 }
    }
}
