//! Contact form intake
//!
//! The message is stored first; the notification runs on its own task and
//! its outcome never reaches the visitor.

use site_core::{ContactMessage, DeliveryReport, Phone};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::dto::{ContactForm, ContactReceipt};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub const CONSENT_REQUIRED: &str = "Необходимо согласиться с политикой конфиденциальности.";
pub const THANK_YOU: &str = "Спасибо за обращение! Мы свяжемся с вами в ближайшее время.";
pub const FORM_INVALID: &str =
    "Произошла ошибка при отправке формы. Проверьте правильность заполнения полей.";

const PHONE_INVALID: &str = "Введите корректный номер телефона (от 10 до 15 цифр)";
const MESSAGE_REQUIRED: &str = "Введите сообщение";

/// A stored lead and the handle of its pending notification
#[derive(Debug)]
pub struct ContactSubmission {
    pub receipt: ContactReceipt,
    pub notification: JoinHandle<DeliveryReport>,
}

/// Service context goes in front of the visitor's own text
fn compose_message(service_context: Option<&str>, message: &str) -> String {
    match service_context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) if message.is_empty() => context.to_string(),
        Some(context) => format!("{context}\n\n{message}"),
        None => message.to_string(),
    }
}

pub struct ContactService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ContactService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, form), fields(is_callback = form.is_callback()))]
    pub async fn submit(&self, mut form: ContactForm) -> ServiceResult<ContactSubmission> {
        if !form.has_consent() {
            warn!("Contact form rejected: no privacy policy consent");
            return Err(ServiceError::field("privacy_policy", CONSENT_REQUIRED));
        }

        form.name = form.name.trim().to_string();
        form.phone = form.phone.trim().to_string();
        form.message = form.message.trim().to_string();

        let mut errors = match form.validate() {
            Ok(()) => Default::default(),
            Err(e) => match ServiceError::from(e) {
                ServiceError::Form(errors) => errors,
                other => return Err(other),
            },
        };
        let phone = Phone::parse(&form.phone);
        if phone.is_err() && !errors.contains_key("phone") {
            errors.insert("phone".to_string(), PHONE_INVALID.to_string());
        }
        if form.message.is_empty() && !form.is_callback() && form.service_context.is_none() {
            errors.insert("message".to_string(), MESSAGE_REQUIRED.to_string());
        }
        let phone = match phone {
            Ok(phone) if errors.is_empty() => phone,
            _ => {
                warn!(fields = ?errors.keys().collect::<Vec<_>>(), "Invalid contact form");
                return Err(ServiceError::Form(errors));
            }
        };

        let is_callback = form.is_callback();
        let message = compose_message(form.service_context.as_deref(), &form.message);
        let contact = ContactMessage::new(form.name, &phone, form.email, message);
        self.ctx.contact_repo().create(&contact).await?;

        let kind = if is_callback { "callback" } else { "message" };
        info!(
            contact_id = %contact.id,
            kind,
            service_context = form.service_context.as_deref().unwrap_or(""),
            "New contact request"
        );

        let notifier = self.ctx.notifier();
        let notice = contact.notice(is_callback);
        let contact_id = contact.id;
        let notification = tokio::spawn(async move {
            let report = notifier.notify_contact(&notice).await;
            if report.is_success() {
                info!(%contact_id, delivered = report.delivered, failed = report.failed, "Lead notification sent");
            } else if !report.is_skipped() {
                error!(%contact_id, failed = report.failed, "Lead notification failed for every recipient");
            }
            report
        });

        Ok(ContactSubmission {
            receipt: ContactReceipt {
                id: contact.id.to_string(),
                message: THANK_YOU.to_string(),
            },
            notification,
        })
    }
}
