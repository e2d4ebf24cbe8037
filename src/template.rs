use askama::Template;

use crate::dto::LeadRequest;

/// Subject and bodies of a lead notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

// Submitted fields are escaped in the HTML body
#[derive(Template)]
#[template(path = "lead_notification.html")]
struct LeadNotificationHtml<'a> {
    lead: &'a LeadRequest,
    service_name: &'a str,
}

#[derive(Template)]
#[template(path = "lead_notification.txt", escape = "none")]
struct LeadNotificationText<'a> {
    lead: &'a LeadRequest,
    service_name: &'a str,
}

pub fn render_lead_notification(
    lead: &LeadRequest,
    service_name: &str,
) -> askama::Result<RenderedEmail> {
    let html = LeadNotificationHtml { lead, service_name }.render()?;
    let text = LeadNotificationText { lead, service_name }.render()?;

    Ok(RenderedEmail {
        subject: format!("New BPO Lead: {}", lead.name),
        html,
        text,
    })
}
