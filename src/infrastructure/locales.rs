//! Per-language label tables and formatting helpers. The PDF renderer uses
//! the fixed primary-language locale; email templates pick the locale from
//! the requested language code.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::billing::{CurrencyCode, InvoiceStatus};
use crate::domain::notification::Language;

#[derive(Debug)]
pub struct Locale {
  pub language: Language,
  date_pattern: &'static str,

  // Document labels
  pub invoice_title: &'static str,
  pub issue_date: &'static str,
  pub due_date: &'static str,
  pub paid_on: &'static str,
  pub issued_by: &'static str,
  pub billed_to: &'static str,
  pub tax_number: &'static str,
  pub col_description: &'static str,
  pub col_quantity: &'static str,
  pub col_unit_price: &'static str,
  pub col_total: &'static str,
  pub grand_total: &'static str,
  pub amount_paid: &'static str,
  pub balance_due: &'static str,
  pub payment_instructions: &'static str,
  pub bank: &'static str,
  pub iban: &'static str,
  pub payment_reference: &'static str,
  pub notes: &'static str,
  pub page: &'static str,
  pub of: &'static str,
  pub disclaimer: &'static str,
  pub watermark_paid: &'static str,

  // Status labels
  status_issued: &'static str,
  status_paid: &'static str,
  status_overdue: &'static str,
  status_canceled: &'static str,

  // Email strings
  pub email_invoice_subject: &'static str,
  pub email_shared_subject: &'static str,
  pub email_greeting: &'static str,
  pub email_invoice_intro: &'static str,
  pub email_invoice_total: &'static str,
  pub email_invoice_due: &'static str,
  pub email_invoice_status: &'static str,
  pub email_shared_intro: &'static str,
  pub email_shared_link: &'static str,
  pub email_shared_pin: &'static str,
  pub email_shared_expires: &'static str,
  pub email_signoff: &'static str,
}

static LOCALE_EN: Locale = Locale {
  language: Language::En,
  date_pattern: "%d %b %Y",
  invoice_title: "INVOICE",
  issue_date: "Issue date",
  due_date: "Due date",
  paid_on: "Paid on",
  issued_by: "Issued by",
  billed_to: "Billed to",
  tax_number: "Tax no.",
  col_description: "Description",
  col_quantity: "Qty",
  col_unit_price: "Unit price",
  col_total: "Total",
  grand_total: "Total due",
  amount_paid: "Amount paid",
  balance_due: "Balance due",
  payment_instructions: "Payment instructions",
  bank: "Bank",
  iban: "IBAN",
  payment_reference: "Reference",
  notes: "Notes",
  page: "Page",
  of: "of",
  disclaimer: "This document was generated electronically and is valid without a signature.",
  watermark_paid: "PAID",
  status_issued: "Issued",
  status_paid: "Paid",
  status_overdue: "Overdue",
  status_canceled: "Canceled",
  email_invoice_subject: "New invoice",
  email_shared_subject: "Project access",
  email_greeting: "Hello",
  email_invoice_intro: "a new invoice has been issued for your project",
  email_invoice_total: "Amount due",
  email_invoice_due: "Due date",
  email_invoice_status: "Status",
  email_shared_intro: "you have been granted access to the project",
  email_shared_link: "Open the project",
  email_shared_pin: "Your access PIN",
  email_shared_expires: "The link expires on",
  email_signoff: "Kind regards",
};

static LOCALE_DE: Locale = Locale {
  language: Language::De,
  date_pattern: "%d.%m.%Y",
  invoice_title: "RECHNUNG",
  issue_date: "Rechnungsdatum",
  due_date: "Fällig am",
  paid_on: "Bezahlt am",
  issued_by: "Aussteller",
  billed_to: "Rechnungsempfänger",
  tax_number: "Steuernr.",
  col_description: "Beschreibung",
  col_quantity: "Menge",
  col_unit_price: "Einzelpreis",
  col_total: "Gesamt",
  grand_total: "Gesamtbetrag",
  amount_paid: "Bezahlt",
  balance_due: "Offener Betrag",
  payment_instructions: "Zahlungshinweise",
  bank: "Bank",
  iban: "IBAN",
  payment_reference: "Verwendungszweck",
  notes: "Anmerkungen",
  page: "Seite",
  of: "von",
  disclaimer: "Dieses Dokument wurde elektronisch erstellt und ist ohne Unterschrift gültig.",
  watermark_paid: "BEZAHLT",
  status_issued: "Ausgestellt",
  status_paid: "Bezahlt",
  status_overdue: "Überfällig",
  status_canceled: "Storniert",
  email_invoice_subject: "Neue Rechnung",
  email_shared_subject: "Projektzugang",
  email_greeting: "Hallo",
  email_invoice_intro: "für Ihr Projekt wurde eine neue Rechnung ausgestellt",
  email_invoice_total: "Fälliger Betrag",
  email_invoice_due: "Fällig am",
  email_invoice_status: "Status",
  email_shared_intro: "Ihnen wurde Zugang zum Projekt gewährt",
  email_shared_link: "Projekt öffnen",
  email_shared_pin: "Ihre Zugangs-PIN",
  email_shared_expires: "Der Link läuft ab am",
  email_signoff: "Mit freundlichen Grüßen",
};

static LOCALE_ES: Locale = Locale {
  language: Language::Es,
  date_pattern: "%d/%m/%Y",
  invoice_title: "FACTURA",
  issue_date: "Fecha de emisión",
  due_date: "Vencimiento",
  paid_on: "Pagada el",
  issued_by: "Emitida por",
  billed_to: "Facturada a",
  tax_number: "NIF",
  col_description: "Descripción",
  col_quantity: "Cant.",
  col_unit_price: "Precio unitario",
  col_total: "Total",
  grand_total: "Total a pagar",
  amount_paid: "Importe pagado",
  balance_due: "Saldo pendiente",
  payment_instructions: "Instrucciones de pago",
  bank: "Banco",
  iban: "IBAN",
  payment_reference: "Referencia",
  notes: "Notas",
  page: "Página",
  of: "de",
  disclaimer: "Este documento se ha generado electrónicamente y es válido sin firma.",
  watermark_paid: "PAGADA",
  status_issued: "Emitida",
  status_paid: "Pagada",
  status_overdue: "Vencida",
  status_canceled: "Anulada",
  email_invoice_subject: "Nueva factura",
  email_shared_subject: "Acceso al proyecto",
  email_greeting: "Hola",
  email_invoice_intro: "se ha emitido una nueva factura para su proyecto",
  email_invoice_total: "Importe a pagar",
  email_invoice_due: "Vencimiento",
  email_invoice_status: "Estado",
  email_shared_intro: "se le ha concedido acceso al proyecto",
  email_shared_link: "Abrir el proyecto",
  email_shared_pin: "Su PIN de acceso",
  email_shared_expires: "El enlace caduca el",
  email_signoff: "Un saludo",
};

impl Locale {
  pub fn for_language(language: Language) -> &'static Locale {
    match language {
      Language::En => &LOCALE_EN,
      Language::De => &LOCALE_DE,
      Language::Es => &LOCALE_ES,
    }
  }

  /// The fixed locale used for PDF documents.
  pub fn document() -> &'static Locale {
    Self::for_language(Language::PRIMARY)
  }

  pub fn status_label(&self, status: InvoiceStatus) -> &'static str {
    match status {
      InvoiceStatus::Issued => self.status_issued,
      InvoiceStatus::Paid => self.status_paid,
      InvoiceStatus::Overdue => self.status_overdue,
      InvoiceStatus::Canceled => self.status_canceled,
    }
  }

  pub fn format_date(&self, date: NaiveDate) -> String {
    date.format(self.date_pattern).to_string()
  }

  /// Raw numeric value with the currency code appended as plain text. No
  /// symbol formatting; the code is part of the displayed string.
  pub fn format_money(&self, amount: Decimal, currency: &CurrencyCode) -> String {
    format!("{:.2} {}", amount, currency.value())
  }
}
