use serde::Deserialize;

use crate::state::AppState;
use crate::types::{PlanCatalog, PlanId};
use crate::web::{escape, layout};

use super::Page;

/// Flags the billing provider appends when it sends the user back.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionQuery {
    pub success: Option<String>,
    pub canceled: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub plan_id: PlanId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Success,
    Canceled,
}

impl SubscriptionQuery {
    fn banner(&self) -> Option<Banner> {
        if flag_set(self.success.as_deref()) {
            Some(Banner::Success)
        } else if flag_set(self.canceled.as_deref()) {
            Some(Banner::Canceled)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscriptionView {
    pub catalog: Option<PlanCatalog>,
    pub banner: Option<Banner>,
    pub notices: Vec<String>,
}

/// Fetch the catalog for this visit. Never cached.
async fn load_view(state: &AppState, banner: Option<Banner>) -> SubscriptionView {
    match state.api.plans().await {
        Ok(catalog) => SubscriptionView {
            catalog: Some(catalog),
            banner,
            notices: Vec::new(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "plan catalog fetch failed");
            SubscriptionView {
                catalog: None,
                banner,
                notices: vec![e.to_string()],
            }
        }
    }
}

pub async fn show(state: &AppState, query: &SubscriptionQuery) -> Page {
    Page::Html(render(&load_view(state, query.banner()).await))
}

/// Start a checkout. Success sends the browser to the provider; failure
/// re-renders the page with the error.
pub async fn checkout(state: &AppState, form: &CheckoutForm) -> Page {
    match state.api.checkout(form.plan_id).await {
        Ok(session) => {
            tracing::info!(plan = %form.plan_id, "redirecting to checkout");
            Page::Redirect(session.url)
        }
        Err(e) => {
            tracing::warn!(plan = %form.plan_id, error = %e, "checkout failed");
            let mut view = load_view(state, None).await;
            view.notices.insert(0, e.to_string());
            Page::Html(render(&view))
        }
    }
}

pub fn render(view: &SubscriptionView) -> String {
    let mut body = String::new();
    match view.banner {
        Some(Banner::Success) => body.push_str(
            "<div class=\"banner banner-ok\">Pagamento confirmado. Sua assinatura será ativada em instantes.</div>\n",
        ),
        Some(Banner::Canceled) => body.push_str(
            "<div class=\"banner banner-warn\">Pagamento cancelado. Nenhuma cobrança foi feita.</div>\n",
        ),
        None => {}
    }
    body.push_str("<h1>Assinatura</h1>\n");

    match &view.catalog {
        None => body.push_str("<p>Carregando...</p>"),
        Some(catalog) => {
            body.push_str(&format!(
                "<p>Stripe habilitado: <b>{}</b></p>\n<div class=\"plans\">\n",
                catalog.enabled
            ));
            for plan in PlanId::ALL {
                body.push_str(&format!(
                    "<form method=\"post\" action=\"/assinatura/checkout\"><input type=\"hidden\" name=\"plan_id\" value=\"{}\"><button type=\"submit\">{}</button></form>\n",
                    plan.as_str(),
                    escape(plan.label())
                ));
            }
            body.push_str("</div>\n<p class=\"note\">*Se Stripe ainda estiver desabilitado, você ativa depois via variáveis de ambiente.</p>");
        }
    }

    layout("Assinatura", &body, &view.notices)
}

fn flag_set(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some(v) if !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
}
