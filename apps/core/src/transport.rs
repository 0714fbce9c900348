use serde::{Deserialize, Serialize};

use crate::action_executor::ShellRunner;
use crate::contract::{CoreRequest, CoreResponse};
use crate::core_service::{CoreService, ServiceError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    ProfileNotFound,
    StoreUnavailable,
    Query,
    Launch,
    Config,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: CoreResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request(
    service: &CoreService,
    shell: &dyn ShellRunner,
    request: CoreRequest,
) -> TransportResponse {
    match service.handle_command(request, shell) {
        Ok(response) => TransportResponse::Ok { response },
        Err(error) => TransportResponse::Err {
            error: map_service_error(error),
        },
    }
}

pub fn handle_json(service: &CoreService, shell: &dyn ShellRunner, payload: &str) -> String {
    let response = match serde_json::from_str::<CoreRequest>(payload) {
        Ok(request) => handle_request(service, shell, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    serde_json::to_string(&response).expect("transport response should serialize")
}

fn map_service_error(error: ServiceError) -> ErrorResponse {
    let message = error.to_string();
    let code = match error {
        ServiceError::Config(_) => ErrorCode::Config,
        ServiceError::ProfileNotFound(_) | ServiceError::ProfileUnreadable { .. } => {
            ErrorCode::ProfileNotFound
        }
        ServiceError::StoreUnavailable { .. } => ErrorCode::StoreUnavailable,
        ServiceError::Query(_) => ErrorCode::Query,
        ServiceError::Launch(_) => ErrorCode::Launch,
    };
    ErrorResponse { code, message }
}
