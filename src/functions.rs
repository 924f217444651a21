pub mod benchmark;
pub mod materialize;
pub mod transform;
