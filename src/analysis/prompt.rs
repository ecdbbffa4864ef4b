//! Prompt sent to the coordinator agent

/// Instruction appended after the market data
pub const ANALYSIS_INSTRUCTION: &str = "Provide complete SOM/SOV analysis with validation, \
calculations, competitive intelligence, and strategic recommendations.";

/// Inputs of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Raw market data exactly as provided (not the preview)
    pub data: String,
    /// Optional analysis period (e.g. "March 2024")
    pub period: Option<String>,
    /// Optional competitor brand names
    pub competitors: Vec<String>,
}

impl AnalysisRequest {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        let period = period.into();
        let period = period.trim();
        self.period = (!period.is_empty()).then(|| period.to_string());
        self
    }

    /// Competitor names, one per line or comma separated
    pub fn with_competitors(mut self, competitors: &str) -> Self {
        self.competitors = competitors
            .split(['\n', ','])
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        self
    }

    pub fn is_blank(&self) -> bool {
        self.data.trim().is_empty()
    }

    /// Combined prompt for the coordinator
    pub fn prompt(&self, market_name: &str) -> String {
        let mut prompt = format!(
            "Analyze this {} data:\n\n{}\n\n{}",
            market_name.to_lowercase(),
            self.data,
            ANALYSIS_INSTRUCTION
        );

        if let Some(ref period) = self.period {
            prompt.push_str(&format!("\nAnalysis period: {}", period));
        }
        if !self.competitors.is_empty() {
            prompt.push_str(&format!("\nCompetitor brands: {}", self.competitors.join(", ")));
        }

        prompt
    }
}
