use serde::{Deserialize, Serialize};

/// Candidate ticker returned by the symbol search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMatch {
    #[serde(rename = "1. symbol")]
    pub symbol: String,
    #[serde(rename = "2. name")]
    pub name: String,
    #[serde(rename = "3. type")]
    pub kind: String,
    #[serde(rename = "4. region")]
    pub region: String,
    #[serde(rename = "5. marketOpen")]
    pub market_open: String,
    #[serde(rename = "6. marketClose")]
    pub market_close: String,
    #[serde(rename = "7. timezone")]
    pub timezone: String,
    #[serde(rename = "8. currency")]
    pub currency: String,
    #[serde(rename = "9. matchScore")]
    pub match_score: String,
}

impl SymbolMatch {
    /// `"TSCO.LON - Tesco PLC"`, the text shown in suggestion lists.
    pub fn display_line(&self) -> String {
        format!("{} - {}", self.symbol, self.name)
    }

    pub fn score(&self) -> Option<f64> {
        self.match_score.trim().parse().ok()
    }
}
