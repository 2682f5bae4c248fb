use std::sync::Arc;

use serde::Deserialize;

use crate::generation::{self, SubmitError};
use crate::state::AppState;
use crate::tab::{TabId, TAB_PARAM};
use crate::types::{GenerationRequest, COUNT_RANGE, DEFAULT_LOTTERY, WINDOW_RANGE};
use crate::web::{escape, layout};

use super::Page;

const DEFAULT_COUNT: i64 = 5;
const DEFAULT_WINDOW: i64 = 50;
/// Values used when a field is submitted empty or non-numeric.
const EMPTY_COUNT: i64 = 1;
const EMPTY_WINDOW: i64 = 50;

pub const RESULT_ROUTE: &str = "/resultado";

/// Where a tab lands after a successful generation.
pub fn result_url(tab: &TabId) -> String {
    format!("{RESULT_ROUTE}?{TAB_PARAM}={tab}")
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuery {
    pub loteria: Option<String>,
    pub aba: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateForm {
    pub loteria: Option<String>,
    pub count: Option<String>,
    pub window: Option<String>,
    pub aba: Option<String>,
}

impl GenerateForm {
    /// Build the request exactly as typed. Range checks are left to the
    /// service.
    pub fn to_request(&self) -> GenerationRequest {
        GenerationRequest {
            lottery: lottery_or_default(self.loteria.as_deref()),
            count: parse_int(self.count.as_deref()).unwrap_or(EMPTY_COUNT),
            window: parse_int(self.window.as_deref()).unwrap_or(EMPTY_WINDOW),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateView {
    pub tab: TabId,
    pub lottery: String,
    pub count: i64,
    pub window: i64,
    pub submitting: bool,
    pub notices: Vec<String>,
}

impl GenerateView {
    fn fresh(tab: TabId, lottery: String, submitting: bool) -> Self {
        Self {
            tab,
            lottery,
            count: DEFAULT_COUNT,
            window: DEFAULT_WINDOW,
            submitting,
            notices: Vec::new(),
        }
    }

    fn from_request(tab: TabId, request: GenerationRequest, submitting: bool, notice: String) -> Self {
        Self {
            tab,
            lottery: request.lottery,
            count: request.count,
            window: request.window,
            submitting,
            notices: vec![notice],
        }
    }
}

pub fn show(state: &AppState, query: &GenerateQuery) -> Page {
    let tab = TabId::resolve(query.aba.as_deref());
    let lottery = lottery_or_default(query.loteria.as_deref());
    let submitting = state.generation.is_submitting(&tab);
    Page::Html(render(&GenerateView::fresh(tab, lottery, submitting)))
}

/// Submit on a detached task and wait for it. If the browser goes away the
/// wait is dropped but the task runs to completion and stores the result.
pub async fn submit(state: &Arc<AppState>, form: &GenerateForm) -> Page {
    let tab = TabId::resolve(form.aba.as_deref());
    let request = form.to_request();

    let spawned = generation::spawn_submit(
        state.api.clone(),
        state.results.clone(),
        &state.generation,
        tab.clone(),
        request.clone(),
    );
    let outcome = match spawned {
        Ok(handle) => match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "generation task failed");
                return Page::Failure(format!("generation task failed: {e}"));
            }
        },
        Err(e) => Err(e),
    };

    match outcome {
        Ok(_) => Page::Redirect(result_url(&tab)),
        Err(SubmitError::AlreadySubmitting) => {
            tracing::warn!(%tab, "generation already in flight, refusing second submit");
            let notice = SubmitError::AlreadySubmitting.to_string();
            Page::Html(render(&GenerateView::from_request(tab, request, true, notice)))
        }
        Err(SubmitError::Api(e)) => {
            tracing::warn!(%tab, status = ?e.status(), error = %e, "generation failed");
            Page::Html(render(&GenerateView::from_request(tab, request, false, e.to_string())))
        }
    }
}

pub fn render(view: &GenerateView) -> String {
    let lottery = escape(&view.lottery);
    let (label, disabled) = if view.submitting {
        ("Gerando...", " disabled")
    } else {
        ("Gerar agora", "")
    };

    let body = format!(
        r#"<h1>Gerar — {lottery}</h1>
<form class="form" method="post" action="/gerar" onsubmit="var b=this.querySelector('button');b.disabled=true;b.textContent='Gerando...';">
<input type="hidden" name="loteria" value="{lottery}">
<input type="hidden" name="{TAB_PARAM}" value="{tab}">
<label>Quantidade de apostas ({count_min}–{count_max})
<input type="number" name="count" value="{count}" min="{count_min}" max="{count_max}">
</label>
<label>Janela ({window_min}–{window_max})
<input type="number" name="window" value="{window}" min="{window_min}" max="{window_max}">
</label>
<button type="submit"{disabled}>{label}</button>
</form>"#,
        tab = escape(view.tab.as_str()),
        count = view.count,
        window = view.window,
        count_min = COUNT_RANGE.0,
        count_max = COUNT_RANGE.1,
        window_min = WINDOW_RANGE.0,
        window_max = WINDOW_RANGE.1,
    );

    layout(&format!("Gerar — {}", view.lottery), &body, &view.notices)
}

fn lottery_or_default(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DEFAULT_LOTTERY.to_string(),
    }
}

/// Leading-integer parse: optional sign then digits, trailing junk ignored
/// ("12abc" -> 12, "7.9" -> 7). `None` when no digits lead the field.
pub(crate) fn parse_int(raw: Option<&str>) -> Option<i64> {
    let s = raw?.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
