//! ASCII wordmark built from authored letter densities.

pub mod animation;
pub mod letters;
pub mod wordmark;
