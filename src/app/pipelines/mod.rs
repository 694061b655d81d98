pub mod bazi_pipeline;

pub use bazi_pipeline::BaziPipeline;
