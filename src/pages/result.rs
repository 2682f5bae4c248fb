use serde::Deserialize;

use crate::state::AppState;
use crate::store::KeyValueStore;
use crate::tab::{TabId, TAB_PARAM};
use crate::types::GenerationResult;
use crate::web::{escape, escape_text, layout};

use super::Page;

#[derive(Debug, Default, Deserialize)]
pub struct ResultQuery {
    pub aba: Option<String>,
}

/// Read `tab`'s stored generation. A missing entry is `Ok(None)`; stored
/// text that does not parse is an error.
pub fn load(
    results: &dyn KeyValueStore,
    tab: &TabId,
) -> Result<Option<GenerationResult>, serde_json::Error> {
    results
        .get(&tab.result_key())
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
}

pub fn show(state: &AppState, query: &ResultQuery) -> Page {
    // no tab, nothing generated from it yet
    let Some(tab) = query.aba.as_deref().and_then(TabId::parse) else {
        return Page::Html(render(None, None));
    };
    match load(state.results.as_ref(), &tab) {
        Ok(result) => Page::Html(render(Some(&tab), result.as_ref())),
        Err(e) => {
            tracing::error!(error = %e, "stored generation result is malformed");
            Page::Failure(format!("stored result is malformed: {e}"))
        }
    }
}

pub fn render(tab: Option<&TabId>, result: Option<&GenerationResult>) -> String {
    let Some(result) = result else {
        let href = match tab {
            Some(tab) => format!("/gerar?{TAB_PARAM}={tab}"),
            None => "/gerar".to_string(),
        };
        let body = format!(
            "<h1>Resultado</h1>\n<p>Nenhuma geração encontrada. Vá em <a href=\"{href}\">“Gerar”</a>.</p>"
        );
        return layout("Resultado", &body, &[]);
    };

    let mut body = format!(
        "<h1>Resultado</h1>\n<p><b>Sessão:</b> {}</p>\n",
        escape(&result.session_id.to_string())
    );
    for bet in &result.bets {
        let audit = serde_json::to_string_pretty(&bet.audit).unwrap_or_default();
        body.push_str(&format!(
            "<div class=\"bet\">\n<div class=\"bet-title\">Aposta {index}</div>\n<div class=\"numbers\">{numbers}</div>\n<details>\n<summary>Auditoria</summary>\n<pre>{audit}</pre>\n</details>\n</div>\n",
            index = bet.index,
            numbers = escape(&bet.numbers_line()),
            audit = escape_text(&audit),
        ));
    }
    layout("Resultado", &body, &[])
}
