use crate::domain::model::{BaziChart, BalanceReport, ChartRequest};
use crate::domain::ports::ChartPipeline;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};

/// 一次排盤與分析的完整結果，交給下游編排層當作上下文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    pub chart: BaziChart,
    pub chart_text: String,
    pub balance: BalanceReport,
    pub balance_text: String,
}

impl Consultation {
    /// 排盤報告與五行分析合併成一段文字
    pub fn prompt_context(&self) -> String {
        format!("{}\n{}", self.chart_text.trim_end(), self.balance_text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct ChartEngine<P: ChartPipeline> {
    pipeline: P,
}

impl<P: ChartPipeline> ChartEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self, request: &ChartRequest) -> Result<Consultation> {
        let span = tracing::info_span!("consultation", name = %request.name);
        let _guard = span.enter();

        request.validate()?;
        tracing::info!("Starting chart for {}", request.birth);

        // Calculate
        let chart = self.pipeline.calculate(request)?;
        tracing::info!(
            "Pillars {} ({:?}), day master {}",
            chart.eight_characters(),
            chart.source,
            chart.day_master()
        );

        // Render
        let chart_text = self.pipeline.render(request, &chart);
        tracing::debug!("Rendered chart report ({} chars)", chart_text.chars().count());

        // Analyze
        let balance = self.pipeline.analyze(&chart, &chart_text)?;
        let balance_text = balance.to_string();
        tracing::info!("Balance analysis complete");

        Ok(Consultation {
            chart,
            chart_text,
            balance,
            balance_text,
        })
    }

    /// 從 JSON 請求執行，給編排層直接呼叫
    pub fn run_json(&self, request_json: &str) -> Result<Consultation> {
        let request: ChartRequest = serde_json::from_str(request_json)?;
        self.run(&request)
    }
}
