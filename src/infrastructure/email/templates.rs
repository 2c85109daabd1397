use tera::{Context, Tera};

use crate::domain::billing::{Invoice, Project, ShareLink};
use crate::domain::notification::{Language, NotificationError, RenderedEmail};
use crate::infrastructure::locales::Locale;

const INVOICE_ISSUED: &str = include_str!("../../../templates/email/invoice_issued.html.tera");
const PROJECT_SHARED: &str = include_str!("../../../templates/email/project_shared.html.tera");

/// Localized email renderer. Templates are compiled once at construction;
/// every render picks its label set and formatting rules from the requested
/// language.
#[derive(Clone)]
pub struct NotificationTemplates {
  tera: std::sync::Arc<Tera>,
  sender_name: String,
  public_base_url: String,
}

impl NotificationTemplates {
  pub fn new(sender_name: String, public_base_url: String) -> Result<Self, NotificationError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
      ("invoice_issued.html", INVOICE_ISSUED),
      ("project_shared.html", PROJECT_SHARED),
    ])?;
    // Client and project names are caller-supplied free text; escaping at
    // the template boundary keeps them inert in the HTML body.
    tera.autoescape_on(vec![".html"]);

    Ok(Self {
      tera: std::sync::Arc::new(tera),
      sender_name,
      public_base_url: public_base_url.trim_end_matches('/').to_string(),
    })
  }

  /// Subject and body for a freshly issued invoice. The subject carries the
  /// invoice number so it stays meaningful in a crowded inbox.
  pub fn render_invoice_issued(
    &self,
    invoice: &Invoice,
    project: &Project,
    language: Language,
  ) -> Result<RenderedEmail, NotificationError> {
    let locale = Locale::for_language(language);
    let currency = invoice.display_currency(project);

    let mut context = Context::new();
    context.insert("lang", locale.language.code());
    context.insert("sender_name", &self.sender_name);
    context.insert("greeting", locale.email_greeting);
    context.insert("client_name", &project.client.name);
    context.insert("intro", locale.email_invoice_intro);
    context.insert("project_name", &project.name);
    context.insert("invoice_label", locale.invoice_title);
    context.insert("invoice_number", invoice.number.value());
    context.insert("total_label", locale.email_invoice_total);
    context.insert(
      "total_amount",
      &locale.format_money(invoice.outstanding_amount(), currency),
    );
    context.insert("due_label", locale.email_invoice_due);
    context.insert("due_date", &locale.format_date(invoice.due_date));
    context.insert("status_label", locale.email_invoice_status);
    context.insert("status", locale.status_label(invoice.status));
    context.insert("signoff", locale.email_signoff);

    Ok(RenderedEmail {
      subject: format!("{}: {}", locale.email_invoice_subject, invoice.number),
      html: self.tera.render("invoice_issued.html", &context)?,
    })
  }

  /// Subject and body announcing access to a shared project. The body
  /// carries the public link, the access PIN when one is set, and the
  /// expiry date when the link is time-limited.
  pub fn render_project_shared(
    &self,
    project: &Project,
    share: &ShareLink,
    pin: Option<&str>,
    language: Language,
  ) -> Result<RenderedEmail, NotificationError> {
    let locale = Locale::for_language(language);

    let mut context = Context::new();
    context.insert("lang", locale.language.code());
    context.insert("sender_name", &self.sender_name);
    context.insert("greeting", locale.email_greeting);
    context.insert("client_name", &project.client.name);
    context.insert("intro", locale.email_shared_intro);
    context.insert("project_name", &project.name);
    context.insert("share_url", &self.share_url(&share.token));
    context.insert("link_label", locale.email_shared_link);
    context.insert("pin_label", locale.email_shared_pin);
    context.insert("pin", &pin);
    context.insert("expires_label", locale.email_shared_expires);
    context.insert(
      "expires_on",
      &share.expires_at.map(|d| locale.format_date(d)),
    );
    context.insert("signoff", locale.email_signoff);

    Ok(RenderedEmail {
      subject: format!("{}: {}", locale.email_shared_subject, project.name),
      html: self.tera.render("project_shared.html", &context)?,
    })
  }

  fn share_url(&self, token: &str) -> String {
    format!("{}/share/{}", self.public_base_url, token)
  }
}
