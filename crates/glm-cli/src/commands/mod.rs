mod build_web;
mod env_file;
mod marathon;
mod pipeline;

pub(crate) use pipeline::{Outputs, run};
