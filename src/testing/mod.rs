pub mod counting_alloc;
pub mod rng;
