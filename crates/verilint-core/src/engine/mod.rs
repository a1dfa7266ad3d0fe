pub mod runner;

pub use runner::BatchRunner;
