use serde::Serialize;

/// One card of the dashboard summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioStat {
    pub label: String,
    pub value: String,
    /// Short change indicator shown next to the value, e.g. `+3.25%`.
    pub change: String,
    /// Whether the change is shown as good news.
    pub positive: bool,
}

impl PortfolioStat {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        change: impl Into<String>,
        positive: bool,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            change: change.into(),
            positive,
        }
    }
}
