pub mod buffer;
pub mod sampler;
