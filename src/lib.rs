pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::app::pipelines::BaziPipeline;
pub use crate::config::TomlConfig;
pub use crate::core::{
    balance::analyze_balance,
    engine::{ChartEngine, Consultation},
    pillars::compute_pillars,
    report::{render_chart, RenderOptions},
};
pub use crate::domain::model::{
    BalanceLevel, BalanceReport, BaziChart, BirthMoment, ChartRequest, ElementTally, Gender,
    Pillar, PillarRole, PillarSource, TallyMode, TallySource,
};
pub use crate::domain::symbols::{Branch, Element, Stem};
pub use crate::utils::error::{BaziError, Result};
