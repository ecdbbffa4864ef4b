//! Result payload shapes, one per agent role
//!
//! Every struct decodes leniently: absent fields fall back to defaults and
//! numbers are taken verbatim from the service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AgentRole;

/// Result payload tagged by the role that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum AgentResult {
    Coordinator(AnalysisCoordinatorResult),
    DataValidation(DataValidationResult),
    SomSovCalculator(SomSovCalculatorResult),
    CompetitiveIntelligence(CompetitiveIntelligenceResult),
    StrategicAdvisor(StrategicAdvisorResult),
    /// Payload that does not fit the role's shape
    Unrecognized(Value),
}

impl AgentResult {
    /// Decode `value` as the shape produced by `role`.
    ///
    /// Non-object payloads and type mismatches become [`AgentResult::Unrecognized`].
    pub fn decode(role: AgentRole, value: &Value) -> Self {
        if !value.is_object() {
            return Self::Unrecognized(value.clone());
        }

        let decoded = match role {
            AgentRole::Coordinator => serde_json::from_value(value.clone()).map(Self::Coordinator),
            AgentRole::DataValidation => {
                serde_json::from_value(value.clone()).map(Self::DataValidation)
            }
            AgentRole::SomSovCalculator => {
                serde_json::from_value(value.clone()).map(Self::SomSovCalculator)
            }
            AgentRole::CompetitiveIntelligence => {
                serde_json::from_value(value.clone()).map(Self::CompetitiveIntelligence)
            }
            AgentRole::StrategicAdvisor => {
                serde_json::from_value(value.clone()).map(Self::StrategicAdvisor)
            }
        };

        decoded.unwrap_or_else(|e| {
            tracing::warn!(role = %role, error = %e, "Result does not match role shape");
            Self::Unrecognized(value.clone())
        })
    }

    pub fn as_coordinator(&self) -> Option<&AnalysisCoordinatorResult> {
        match self {
            Self::Coordinator(r) => Some(r),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Analysis Coordinator
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisCoordinatorResult {
    pub validation_summary: ValidationSummary,
    pub market_metrics: MarketMetrics,
    pub competitive_insights: CompetitiveInsights,
    pub strategic_recommendations: StrategicRecommendations,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSummary {
    pub data_quality_status: String,
    pub issues_found: Vec<Value>,
    pub total_brands_analyzed: f64,
}

impl ValidationSummary {
    /// The service reports clean data as "Valid"
    pub fn is_valid(&self) -> bool {
        self.data_quality_status == "Valid"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketMetrics {
    pub total_market_share: f64,
    pub total_voice_share: f64,
    pub top_brand_som: f64,
    pub top_brand_sov: f64,
    pub efficiency_leader: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitiveInsights {
    pub market_trends: Vec<String>,
    pub competitor_activities: Vec<String>,
    pub industry_developments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategicRecommendations {
    pub priority_actions: Vec<String>,
    pub risk_areas: Vec<String>,
    pub opportunity_areas: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// SOM/SOV Calculator
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SomSovCalculatorResult {
    pub brand_metrics: Vec<BrandMetric>,
    pub market_totals: MarketTotals,
    pub trends: Trends,
    pub benchmarks: Benchmarks,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandMetric {
    pub brand_name: String,
    pub som_percentage: f64,
    pub sov_percentage: f64,
    pub som_sov_ratio: f64,
    pub market_rank: f64,
    pub sales_value: f64,
    pub ad_spend: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketTotals {
    pub total_sales: f64,
    pub total_ad_spend: f64,
    pub total_brands: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trends {
    pub mom_change: f64,
    pub yoy_change: Option<f64>,
    pub trend_direction: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Benchmarks {
    pub market_leader: String,
    pub voice_leader: String,
    pub most_efficient: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Data Validation
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataValidationResult {
    pub validation_passed: bool,
    pub quality_score: f64,
    pub completeness_check: CompletenessCheck,
    pub format_check: FormatCheck,
    pub anomaly_detection: AnomalyDetection,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletenessCheck {
    pub missing_fields: Vec<String>,
    pub completeness_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatCheck {
    pub format_errors: Vec<FormatIssue>,
    pub format_valid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatIssue {
    pub field: String,
    pub issue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyDetection {
    pub anomalies_found: Vec<Anomaly>,
    pub anomaly_count: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Anomaly {
    pub field: String,
    pub value: Value,
    pub reason: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Competitive Intelligence
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitiveIntelligenceResult {
    pub market_trends: Vec<MarketTrend>,
    pub competitor_activities: Vec<CompetitorActivity>,
    pub industry_news: Vec<IndustryNews>,
    pub consumer_insights: ConsumerInsights,
    pub strategic_implications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketTrend {
    pub trend: String,
    pub impact: String,
    pub description: String,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitorActivity {
    pub competitor: String,
    pub activity: String,
    pub date: String,
    pub significance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryNews {
    pub headline: String,
    pub summary: String,
    pub date: String,
    pub relevance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerInsights {
    pub key_behaviors: Vec<String>,
    pub demographic_shifts: Vec<String>,
    pub purchase_drivers: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategic Advisor
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategicAdvisorResult {
    pub executive_summary: String,
    pub swot_analysis: SwotAnalysis,
    pub strategic_recommendations: Vec<StrategicRecommendation>,
    pub risk_assessment: Vec<RiskAssessment>,
    pub success_metrics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategicRecommendation {
    pub priority: String,
    pub recommendation: String,
    pub rationale: String,
    pub expected_impact: String,
    pub timeframe: String,
    pub action_steps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAssessment {
    pub risk: String,
    pub likelihood: String,
    pub impact: String,
    pub mitigation: String,
}
