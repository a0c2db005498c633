pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod settle;
pub mod color;
pub mod magnets;
pub mod generator;
pub mod scenario;
