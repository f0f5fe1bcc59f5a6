// Handler for the ModerateContent RPC
use tonic::{Response, Status};

use crate::feed::moderation::{moderate, ModerationConfig, Severity};
use crate::services::generated::moderate_content_response::Severity as ProtoSeverity;
use crate::services::{ModerateContentRequest, ModerateContentResponse};

pub async fn handle_moderate_content(
    req_payload: ModerateContentRequest,
    config: &ModerationConfig,
) -> Result<Response<ModerateContentResponse>, Status> {
    let outcome = moderate(&req_payload.content, config);

    let severity = match outcome.severity {
        Severity::None => ProtoSeverity::None,
        Severity::Warning => ProtoSeverity::Warning,
        Severity::Blocked => ProtoSeverity::Blocked,
    };

    tracing::debug!(
        severity = ?outcome.severity,
        triggered_count = outcome.triggered.len(),
        "Moderated content"
    );
    Ok(Response::new(ModerateContentResponse {
        severity: severity as i32,
        message: outcome.message,
        triggered: outcome.triggered,
    }))
}
