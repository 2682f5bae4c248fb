use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tokio::task::JoinHandle;

use crate::api::{ApiClient, ApiError};
use crate::store::KeyValueStore;
use crate::tab::TabId;
use crate::types::{GenerationRequest, GenerationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationPhase {
    Idle,
    Submitting { request: GenerationRequest },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Uma geração já está em andamento.")]
    AlreadySubmitting,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Submission state of the generation page, one phase per tab. A tab has
/// at most one request in flight; a second `begin` from the same tab while
/// submitting is refused. Idle tabs have no entry.
#[derive(Debug, Clone, Default)]
pub struct GenerationFlow {
    phases: Arc<Mutex<HashMap<TabId, GenerationPhase>>>,
}

impl GenerationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, tab: &TabId) -> GenerationPhase {
        self.phases
            .lock()
            .unwrap()
            .get(tab)
            .cloned()
            .unwrap_or(GenerationPhase::Idle)
    }

    pub fn is_submitting(&self, tab: &TabId) -> bool {
        matches!(self.phase(tab), GenerationPhase::Submitting { .. })
    }

    /// Idle -> Submitting for `tab`. The returned guard owns its way back:
    /// dropping it returns the tab to Idle, whatever the outcome.
    pub fn begin(&self, tab: TabId, request: GenerationRequest) -> Result<Submission, SubmitError> {
        let mut phases = self.phases.lock().unwrap();
        if let Some(GenerationPhase::Submitting { .. }) = phases.get(&tab) {
            return Err(SubmitError::AlreadySubmitting);
        }
        phases.insert(
            tab.clone(),
            GenerationPhase::Submitting {
                request: request.clone(),
            },
        );
        Ok(Submission {
            phases: self.phases.clone(),
            tab,
            request,
        })
    }
}

#[derive(Debug)]
pub struct Submission {
    phases: Arc<Mutex<HashMap<TabId, GenerationPhase>>>,
    tab: TabId,
    request: GenerationRequest,
}

impl Submission {
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn tab(&self) -> &TabId {
        &self.tab
    }
}

impl Drop for Submission {
    fn drop(&mut self) {
        self.phases.lock().unwrap().remove(&self.tab);
    }
}

/// Start one submission for `tab` on its own task.
///
/// The transition to Submitting happens before this returns, so a refused
/// second submit never reaches the network. The task owns everything it
/// touches: if the caller stops awaiting the handle (browser gone), the
/// request still completes and the response is still stored.
pub fn spawn_submit(
    api: ApiClient,
    results: Arc<dyn KeyValueStore>,
    flow: &GenerationFlow,
    tab: TabId,
    request: GenerationRequest,
) -> Result<JoinHandle<Result<GenerationResult, SubmitError>>, SubmitError> {
    let submission = flow.begin(tab, request)?;
    Ok(tokio::spawn(async move {
        run(&api, results.as_ref(), &submission).await
    }))
}

async fn run(
    api: &ApiClient,
    results: &dyn KeyValueStore,
    submission: &Submission,
) -> Result<GenerationResult, SubmitError> {
    let request = submission.request();
    tracing::info!(
        tab = %submission.tab(),
        lottery = %request.lottery,
        count = request.count,
        window = request.window,
        "submitting generation"
    );

    let raw = api.generate(request).await?;
    let result = GenerationResult::deserialize(&raw).map_err(ApiError::from)?;
    // the body is kept verbatim, including fields this client does not model
    results.set(&submission.tab().result_key(), raw.to_string());

    tracing::info!(
        tab = %submission.tab(),
        session = %result.session_id,
        bets = result.bets.len(),
        "generation stored"
    );
    Ok(result)
}
