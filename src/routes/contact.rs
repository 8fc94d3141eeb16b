use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use folio_contact::{
    ContactForm, Notification, Notifier, SubmissionOutcome, SubmissionStatus, Variant,
};
use folio_shared::ContactLabels;
use validator::ValidationErrors;

use crate::{
    routes::AppState,
    session::{self, ContactSession, SESSION_COOKIE},
    template::{Template, ToastErrorTemplate, ToastSuccessTemplate},
};

const FIELD_ORDER: [&str; 3] = ["name", "email", "message"];

/// Sent by the page script; plain form posts are redirected back to the page.
pub const FRAGMENT_HEADER: &str = "x-requested-with";

#[derive(askama::Template)]
#[template(path = "partials/contact-form.html")]
pub struct ContactFormTemplate<'a> {
    pub labels: &'a ContactLabels,
    pub form: ContactForm,
    pub status: SubmissionStatus,
    pub submitting: bool,
    pub submitted: bool,
    pub toasts: String,
}

impl<'a> ContactFormTemplate<'a> {
    /// Renders the session's draft and status, draining its pending toasts.
    pub fn new(
        template: &Template,
        labels: &'a ContactLabels,
        session: Option<&ContactSession>,
    ) -> Self {
        let Some(session) = session else {
            return Self {
                labels,
                form: ContactForm::default(),
                status: SubmissionStatus::Idle,
                submitting: false,
                submitted: false,
                toasts: String::new(),
            };
        };

        let status = session.controller.status();
        let toasts = session
            .toasts
            .drain()
            .into_iter()
            .map(|toast| match toast.variant {
                Variant::Success => template.to_string(ToastSuccessTemplate {
                    message: &toast.title,
                    description: Some(&toast.description),
                }),
                Variant::Destructive => template.to_string(ToastErrorTemplate {
                    message: &toast.title,
                    description: Some(&toast.description),
                }),
            })
            .collect();

        Self {
            labels,
            form: session.controller.form(),
            status,
            submitting: status == SubmissionStatus::Submitting,
            submitted: status == SubmissionStatus::Submitted,
            toasts,
        }
    }
}

fn invalid_fields(errors: &ValidationErrors) -> String {
    let mut fields = errors
        .field_errors()
        .into_keys()
        .map(|field| field.to_string())
        .collect::<Vec<_>>();

    fields.sort_by_key(|field| FIELD_ORDER.iter().position(|f| *f == field.as_str()));

    format!("Please provide a valid {}.", fields.join(", "))
}

/// GET /contact/form - the visitor's contact form in its current state
pub async fn form(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
) -> impl IntoResponse {
    let content = crate::try_page_response!(content: template);
    let session = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| app.contact.get(cookie.value()));

    template.render(ContactFormTemplate::new(
        &template,
        &content.portfolio.sections.contact.form,
        session.as_ref(),
    ))
}

/// POST /contact - validate and hand the message to the visitor's controller
pub async fn action(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(input): Form<ContactForm>,
) -> impl IntoResponse {
    let content = crate::try_page_response!(content: template);
    let (jar, id) = session::session_id(jar);
    let session = app.contact.get_or_create(&id);

    let status = match input.clone().into_submission() {
        Ok(submission) => match session.controller.submit(submission).await {
            SubmissionOutcome::Sent | SubmissionOutcome::Failed(_) => StatusCode::OK,
            SubmissionOutcome::Busy => {
                session.toasts.notify(Notification::destructive(
                    "Message already sending",
                    "Please wait for the current message to finish.",
                ));

                StatusCode::CONFLICT
            }
        },
        Err(errors) => {
            tracing::debug!(session = %id, "Contact form rejected by validation");

            session.controller.update_form(input);
            session.toasts.notify(Notification::destructive(
                "Please check the form",
                invalid_fields(&errors),
            ));

            StatusCode::UNPROCESSABLE_ENTITY
        }
    };

    if !headers.contains_key(FRAGMENT_HEADER) {
        return (jar, Redirect::to("/#contact")).into_response();
    }

    let form = ContactFormTemplate::new(
        &template,
        &content.portfolio.sections.contact.form,
        Some(&session),
    );

    (status, jar, template.render(form)).into_response()
}
