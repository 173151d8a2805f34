pub mod core;
pub mod perception;
pub mod solvers;
pub mod bench;
