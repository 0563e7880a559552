//! Contact form submission
//!
//! Page script posts with `X-Requested-With` and gets JSON back; a plain form
//! post gets a redirect or the form again with its errors.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Serialize;
use serde_json::json;
use site_service::dto::{ContactForm, SiteContext};
use site_service::services::contact::{CONSENT_REQUIRED, FORM_INVALID};
use site_service::services::FieldErrors;
use site_service::{ContactService, PageService, ServiceError};
use tracing::debug;

use super::render;
use crate::extractors::IsAjax;
use crate::response::{PageError, PageResult};
use crate::state::AppState;

#[derive(Serialize)]
struct ContactFormView {
    site: SiteContext,
    form: serde_json::Value,
    errors: FieldErrors,
    form_error: &'static str,
    service_context: Option<String>,
}

/// POST /contacts/send/
pub async fn send(
    State(state): State<AppState>,
    IsAjax(ajax): IsAjax,
    Form(form): Form<ContactForm>,
) -> PageResult<Response> {
    if !form.has_consent() {
        if ajax {
            let body = json!({ "success": false, "error": CONSENT_REQUIRED });
            return Ok((StatusCode::OK, Json(body)).into_response());
        }
        return Ok(Redirect::to("/").into_response());
    }

    match ContactService::new(state.service_context()).submit(form.clone()).await {
        Ok(submission) => {
            // Delivery continues in the background
            drop(submission.notification);
            debug!(contact_id = %submission.receipt.id, "Contact accepted");
            if ajax {
                let body = json!({ "success": true, "message": submission.receipt.message });
                Ok(Json(body).into_response())
            } else {
                Ok(Redirect::to("/").into_response())
            }
        }
        Err(ServiceError::Form(errors)) => {
            if ajax {
                let body = json!({ "success": false, "errors": errors });
                return Ok(Json(body).into_response());
            }
            let view = ContactFormView {
                site: PageService::new(state.service_context()).site_context().await,
                form: json!({
                    "name": form.name,
                    "phone": form.phone,
                    "email": form.email,
                    "message": form.message,
                }),
                errors,
                form_error: FORM_INVALID,
                service_context: form.service_context,
            };
            Ok(render(&state, "contact", &view)?.into_response())
        }
        Err(e) => Err(PageError::Service(e)),
    }
}
