use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::billing::Project;
use crate::domain::notification::{
  DeliveryReport, Language, NotificationError, OutboundEmail, TransportKind,
};
use crate::infrastructure::email::{DeliveryPipeline, NotificationTemplates};

#[derive(Debug, Deserialize)]
pub struct SendProjectSharedNotificationCommand {
  pub project: Project,
  /// Access PIN shown alongside the link when the share is PIN-protected.
  pub pin: Option<String>,
  pub language: String,
}

#[derive(Debug, Serialize)]
pub struct SendProjectSharedNotificationResponse {
  pub success: bool,
  pub message_id: Option<String>,
  pub transport_used: Option<TransportKind>,
  pub error: Option<String>,
}

impl From<DeliveryReport> for SendProjectSharedNotificationResponse {
  fn from(report: DeliveryReport) -> Self {
    Self {
      success: report.success,
      message_id: report.message_id.clone(),
      transport_used: report.transport_used,
      error: report.error_detail(),
    }
  }
}

pub struct SendProjectSharedNotificationUseCase {
  templates: NotificationTemplates,
  pipeline: Arc<DeliveryPipeline>,
}

impl SendProjectSharedNotificationUseCase {
  pub fn new(templates: NotificationTemplates, pipeline: Arc<DeliveryPipeline>) -> Self {
    Self {
      templates,
      pipeline,
    }
  }

  pub async fn execute(
    &self,
    command: SendProjectSharedNotificationCommand,
  ) -> Result<SendProjectSharedNotificationResponse, NotificationError> {
    let recipient = command
      .project
      .client
      .email
      .clone()
      .ok_or(NotificationError::MissingRecipient)?;
    let share = command
      .project
      .sharing
      .clone()
      .ok_or(NotificationError::MissingShareLink)?;

    let language = Language::from_code(&command.language);
    let rendered = self.templates.render_project_shared(
      &command.project,
      &share,
      command.pin.as_deref(),
      language,
    )?;

    let email = OutboundEmail::new(recipient, rendered);
    let report = self.pipeline.send(&email).await;

    Ok(report.into())
  }
}
