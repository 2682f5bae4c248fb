use serde::{Deserialize, Serialize};

pub const DEFAULT_LOTTERY: &str = "lotomania";

/// Bounds advertised on the generation form. The service enforces them;
/// the form only passes them to the input widgets.
pub const COUNT_RANGE: (i64, i64) = (1, 50);
pub const WINDOW_RANGE: (i64, i64) = (20, 200);

/// A lottery the home page offers. Only `available` ones link anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LotteryCard {
    pub slug: &'static str,
    pub name: &'static str,
    pub available: bool,
}

pub const LOTTERIES: [LotteryCard; 3] = [
    LotteryCard { slug: "lotomania", name: "Lotomania", available: true },
    LotteryCard { slug: "lotofacil", name: "Lotofácil", available: false },
    LotteryCard { slug: "megasena", name: "Mega-Sena", available: false },
];

/// JSON number or string, kept exactly as the service sent it.
///
/// Session ids come back as integers and bet numbers as zero-padded
/// strings ("03"), while other deployments send plain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Body of `POST /generate`. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub lottery: String,
    pub count: i64,
    pub window: i64,
}

/// Render view of a stored generation. The stored text itself is the raw
/// service body; fields not listed here stay in it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub session_id: Scalar,
    pub bets: Vec<Bet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub index: i64,
    pub numbers: Vec<Scalar>,
    #[serde(default)]
    pub audit: serde_json::Value,
}

impl Bet {
    pub fn numbers_line(&self) -> String {
        self.numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCatalog {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanId {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl PlanId {
    pub const ALL: [PlanId; 3] = [PlanId::OneMonth, PlanId::ThreeMonths, PlanId::OneYear];

    pub fn as_str(self) -> &'static str {
        match self {
            PlanId::OneMonth => "1m",
            PlanId::ThreeMonths => "3m",
            PlanId::OneYear => "1y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlanId::OneMonth => "Assinar 1 mês",
            PlanId::ThreeMonths => "Assinar 3 meses",
            PlanId::OneYear => "Assinar 1 ano",
        }
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
