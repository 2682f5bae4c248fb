use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::store::LAST_RESULT_KEY;

/// Query/form field carrying the tab id between pages.
pub const TAB_PARAM: &str = "aba";

const TAB_ID_LEN: usize = 16;

/// Identifies one browser tab's generation flow and result slot.
///
/// Minted when a tab opens the generation form and carried through the
/// form and the result URL, so two tabs never share state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TabId(String);

impl TabId {
    pub fn generate() -> Self {
        let id = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TAB_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    /// Accept only ids shaped like ours: 8 to 64 ASCII alphanumerics.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let ok = (8..=64).contains(&raw.len()) && raw.chars().all(|c| c.is_ascii_alphanumeric());
        ok.then(|| Self(raw.to_string()))
    }

    /// The submitted id, or a fresh one when it is missing or malformed.
    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Transient-store key of this tab's last generation result.
    pub fn result_key(&self) -> String {
        format!("{LAST_RESULT_KEY}:{}", self.0)
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
