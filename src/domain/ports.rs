use crate::domain::model::{BaziChart, BalanceReport, ChartRequest, TallyMode};
use crate::utils::error::Result;

pub trait ConfigProvider: Send + Sync {
    fn tally_mode(&self) -> TallyMode;
    fn include_subject(&self) -> bool;
    fn include_notes(&self) -> bool;
}

/// 排盤 → 報告 → 五行分析，三個階段都是同步純計算
pub trait ChartPipeline: Send + Sync {
    fn calculate(&self, request: &ChartRequest) -> Result<BaziChart>;
    fn render(&self, request: &ChartRequest, chart: &BaziChart) -> String;
    fn analyze(&self, chart: &BaziChart, chart_text: &str) -> Result<BalanceReport>;
}
