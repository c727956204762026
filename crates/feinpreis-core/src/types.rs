use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metal {
    Gold,
    Silver,
    Platinum,
    Palladium,
}

impl std::fmt::Display for Metal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metal::Gold => write!(f, "gold"),
            Metal::Silver => write!(f, "silver"),
            Metal::Platinum => write!(f, "platinum"),
            Metal::Palladium => write!(f, "palladium"),
        }
    }
}

/// One configured item to price. Loaded once per run, never mutated.
///
/// `selector` is optional; when absent the explicit-selector extraction
/// strategy is skipped for this target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub name: String,
    pub url: String,
    pub metal: Option<Metal>,
    pub fine_in_grams: Option<f64>,
    pub selector: Option<String>,
}

/// Per-target outcome, constructed exactly once after the strategy chain
/// finishes.
///
/// Invariants: `ok == price.is_some()`; `price`, when present, is finite and
/// is the normalizer's output, never raw page text. `notes` is the ordered
/// audit trail of the strategies attempted for this target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub id: String,
    pub name: String,
    pub url: String,
    pub metal: Option<Metal>,
    pub fine_in_grams: Option<f64>,
    pub price: Option<f64>,
    pub ok: bool,
    pub notes: Vec<String>,
}

/// The final artifact of a run, written exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<ScrapeResult>,
}
