//! Fixed dashboard and history content
//!
//! Nothing here is derived from analysis runs.

/// A headline metric card on the dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpi {
    pub label: &'static str,
    pub value: &'static str,
    pub change: Option<&'static str>,
    pub caption: &'static str,
}

pub const SOM_KPI: Kpi = Kpi {
    label: "Share of Market",
    value: "15.0%",
    change: Some("+2.1%"),
    caption: "vs last period",
};

pub const SOV_KPI: Kpi = Kpi {
    label: "Share of Voice",
    value: "13.3%",
    change: Some("+1.8%"),
    caption: "vs last period",
};

/// SOV/SOM ratio shown on the ratio card
pub const EFFICIENCY_RATIO: f64 = 1.13;

/// Ratios above this capture share efficiently
pub const EFFICIENCY_TARGET: f64 = 1.0;

pub fn is_efficient(ratio: f64) -> bool {
    ratio > EFFICIENCY_TARGET
}

/// One month of the six-month trend chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub month: &'static str,
    pub brand_som: f64,
    pub brand_sov: f64,
    pub competitor_som: f64,
    pub competitor_sov: f64,
}

const fn point(month: &'static str, bsom: f64, bsov: f64, csom: f64, csov: f64) -> TrendPoint {
    TrendPoint {
        month,
        brand_som: bsom,
        brand_sov: bsov,
        competitor_som: csom,
        competitor_sov: csov,
    }
}

pub const TREND: [TrendPoint; 6] = [
    point("Oct", 13.0, 11.0, 15.0, 14.0),
    point("Nov", 14.0, 12.0, 14.0, 13.0),
    point("Dec", 15.0, 13.0, 13.0, 12.0),
    point("Jan", 15.0, 13.5, 12.0, 11.0),
    point("Feb", 16.0, 14.0, 11.0, 10.0),
    point("Mar", 17.0, 15.0, 10.0, 9.0),
];

/// A past analysis listed on the history screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u32,
    pub date: &'static str,
    pub period: &'static str,
    pub brands: u32,
    pub succeeded: bool,
    pub key_finding: &'static str,
}

impl HistoryEntry {
    pub fn status_label(&self) -> &'static str {
        if self.succeeded {
            "Success"
        } else {
            "Error"
        }
    }
}

pub const HISTORY: [HistoryEntry; 3] = [
    HistoryEntry {
        id: 1,
        date: "2024-03-15",
        period: "March 2024",
        brands: 3,
        succeeded: true,
        key_finding: "Brand B shows highest efficiency with SOV/SOM ratio of 1.13",
    },
    HistoryEntry {
        id: 2,
        date: "2024-02-15",
        period: "February 2024",
        brands: 3,
        succeeded: true,
        key_finding: "Market share increased by 7.14% MoM",
    },
    HistoryEntry {
        id: 3,
        date: "2024-01-15",
        period: "January 2024",
        brands: 3,
        succeeded: true,
        key_finding: "Competitive activity increased in premium segment",
    },
];

/// How many history entries can be compared at once
pub const MAX_COMPARE: usize = 2;

/// Entries picked for comparison, in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySelection {
    ids: Vec<u32>,
}

impl HistorySelection {
    /// Select or deselect `id`. A third selection is ignored.
    ///
    /// Returns whether the entry is selected afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        if let Some(pos) = self.ids.iter().position(|&s| s == id) {
            self.ids.remove(pos);
            return false;
        }
        if self.ids.len() < MAX_COMPARE {
            self.ids.push(id);
            return true;
        }
        false
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn can_compare(&self) -> bool {
        self.ids.len() == MAX_COMPARE
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_badge() {
        assert!(is_efficient(EFFICIENCY_RATIO));
        assert!(!is_efficient(1.0));
        assert!(!is_efficient(0.8));
    }

    #[test]
    fn test_trend_covers_six_months() {
        let months: Vec<_> = TREND.iter().map(|p| p.month).collect();
        assert_eq!(months, ["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]);
    }

    #[test]
    fn test_selection_caps_at_two() {
        let mut selection = HistorySelection::default();
        assert!(selection.toggle(1));
        assert!(!selection.can_compare());
        assert!(selection.toggle(2));
        assert!(selection.can_compare());

        assert!(!selection.toggle(3));
        assert_eq!(selection.ids(), &[1, 2]);
    }

    #[test]
    fn test_selection_toggle_off() {
        let mut selection = HistorySelection::default();
        selection.toggle(1);
        selection.toggle(2);
        assert!(!selection.toggle(1));
        assert_eq!(selection.ids(), &[2]);
        assert!(selection.toggle(3));
        assert!(selection.can_compare());
    }
}
