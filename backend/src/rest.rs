//! REST surface over the domain services.
//!
//! Thin axum handlers: decode the request, call one service, map the
//! result to a status code. Domain failures map as validation -> 400,
//! missing record -> 404, storage failure -> 500.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{
    CreateDonationRequest, CreateDonorRequest, CreateExpenseRequest, CreateMemberRequest,
    ExportToPathRequest, ReportKind, SessionStatus, SignInRequest, UpdateExpenseStatusRequest,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::DomainError;
use crate::Backend;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<Backend>,
}

impl AppState {
    pub fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }
}

fn error_response(context: &str, err: DomainError) -> Response {
    match err {
        DomainError::Validation(message) => {
            info!("{context}: rejected ({message})");
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        DomainError::NotFound { entity, id } => {
            info!("{context}: {entity} {id} not found");
            (StatusCode::NOT_FOUND, format!("{entity} not found: {id}")).into_response()
        }
        DomainError::Store(store_err) => {
            error!("{context}: storage failure: {store_err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "storage failure".to_string()).into_response()
        }
    }
}

/// GET /api/donors
pub async fn list_donors(State(state): State<AppState>) -> Response {
    match state.backend.donor_service.list_donors() {
        Ok(donors) => (StatusCode::OK, Json(donors)).into_response(),
        Err(e) => error_response("GET /api/donors", e),
    }
}

/// POST /api/donors
pub async fn create_donor(
    State(state): State<AppState>,
    Json(request): Json<CreateDonorRequest>,
) -> Response {
    match state.backend.donor_service.create_donor(request) {
        Ok(donor) => (StatusCode::CREATED, Json(donor)).into_response(),
        Err(e) => error_response("POST /api/donors", e),
    }
}

/// DELETE /api/donors/:id
pub async fn delete_donor(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.backend.donor_service.delete_donor(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("DELETE /api/donors", e),
    }
}

/// GET /api/donations
pub async fn list_donations(State(state): State<AppState>) -> Response {
    match state.backend.donation_service.list_donations() {
        Ok(donations) => (StatusCode::OK, Json(donations)).into_response(),
        Err(e) => error_response("GET /api/donations", e),
    }
}

/// POST /api/donations
pub async fn create_donation(
    State(state): State<AppState>,
    Json(request): Json<CreateDonationRequest>,
) -> Response {
    match state.backend.donation_service.record_donation(request) {
        Ok(donation) => (StatusCode::CREATED, Json(donation)).into_response(),
        Err(e) => error_response("POST /api/donations", e),
    }
}

/// GET /api/expenses
pub async fn list_expenses(State(state): State<AppState>) -> Response {
    match state.backend.expense_service.list_expenses() {
        Ok(expenses) => (StatusCode::OK, Json(expenses)).into_response(),
        Err(e) => error_response("GET /api/expenses", e),
    }
}

/// POST /api/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> Response {
    match state.backend.expense_service.record_expense(request) {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(e) => error_response("POST /api/expenses", e),
    }
}

/// PUT /api/expenses/:id/status
pub async fn update_expense_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateExpenseStatusRequest>,
) -> Response {
    match state.backend.expense_service.update_status(&id, request.status) {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(e) => error_response("PUT /api/expenses/:id/status", e),
    }
}

/// GET /api/members
pub async fn list_members(State(state): State<AppState>) -> Response {
    match state.backend.member_service.list_members() {
        Ok(members) => (StatusCode::OK, Json(members)).into_response(),
        Err(e) => error_response("GET /api/members", e),
    }
}

/// POST /api/members
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> Response {
    match state.backend.member_service.enroll_member(request) {
        Ok(member) => (StatusCode::CREATED, Json(member)).into_response(),
        Err(e) => error_response("POST /api/members", e),
    }
}

/// DELETE /api/members/:id
pub async fn delete_member(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.backend.member_service.remove_member(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("DELETE /api/members", e),
    }
}

/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Response {
    match state.backend.report_service.dashboard() {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response("GET /api/dashboard", e),
    }
}

/// GET /api/reports
pub async fn get_report(State(state): State<AppState>) -> Response {
    match state.backend.report_service.financial_report() {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response("GET /api/reports", e),
    }
}

/// GET /api/reports/export/:kind
pub async fn export_report(State(state): State<AppState>, Path(kind): Path<String>) -> Response {
    let kind: ReportKind = match kind.parse() {
        Ok(kind) => kind,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match state
        .backend
        .export_service
        .export_report_csv(kind, &state.backend.report_service)
    {
        Ok(export) => (StatusCode::OK, Json(export)).into_response(),
        Err(e) => error_response("GET /api/reports/export", e),
    }
}

/// POST /api/reports/export
pub async fn export_report_to_path(
    State(state): State<AppState>,
    Json(request): Json<ExportToPathRequest>,
) -> Response {
    match state
        .backend
        .export_service
        .export_to_path(request, &state.backend.report_service)
    {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response("POST /api/reports/export", e),
    }
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Response {
    match state.backend.session_service.is_signed_in() {
        Ok(signed_in) => (StatusCode::OK, Json(SessionStatus { signed_in })).into_response(),
        Err(e) => error_response("GET /api/session", e),
    }
}

/// POST /api/session
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Response {
    match state.backend.session_service.sign_in(&request.email) {
        Ok(()) => (StatusCode::CREATED, Json(SessionStatus { signed_in: true })).into_response(),
        Err(e) => error_response("POST /api/session", e),
    }
}

/// DELETE /api/session
pub async fn sign_out(State(state): State<AppState>) -> Response {
    match state.backend.session_service.sign_out() {
        Ok(()) => (StatusCode::OK, Json(SessionStatus { signed_in: false })).into_response(),
        Err(e) => error_response("DELETE /api/session", e),
    }
}
