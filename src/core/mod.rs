pub mod balance;
pub mod engine;
pub mod pillars;
pub mod report;

pub use crate::domain::model::{BaziChart, BalanceReport, ChartRequest};
pub use crate::domain::ports::{ChartPipeline, ConfigProvider};
pub use crate::utils::error::Result;
