//! HTTP request handlers for the HR ledger API.
//!
//! Handlers are thin: they bind the request, call one service operation and
//! map the outcome onto a JSON response. Every request is tagged with a
//! correlation id in the logs.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{ManualAttendance, NewLeaveRequest, PayrollAdjustment};

use super::request::{
    ApproveRequest, AttendanceQuery, ClockRequest, GeneratePayrollRequest, LeaveListQuery,
    PayrollListQuery, PeriodQuery, ReportQuery,
};
use super::response::{ApiError, ApiErrorResponse, AttendanceReport, GeneratedPayroll};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance", get(list_attendance_handler))
        .route("/attendance/clock-in", post(clock_in_handler))
        .route("/attendance/clock-out", post(clock_out_handler))
        .route("/attendance/report", get(attendance_report_handler))
        .route("/attendance/manual", post(manual_attendance_handler))
        .route("/leaves", post(create_leave_handler).get(list_leaves_handler))
        .route("/leaves/:id", get(get_leave_handler))
        .route("/leaves/:id/approve", put(approve_leave_handler))
        .route("/leaves/balance/:employee_id", get(leave_balance_handler))
        .route("/payroll", get(list_payroll_handler))
        .route("/payroll/generate", post(generate_payroll_handler))
        .route("/payroll/summary", get(payroll_summary_handler))
        .route("/payroll/:id", get(get_payroll_handler).put(update_payroll_handler))
        .route("/payroll/:id/pay", post(process_payment_handler))
        .route("/payroll/:id/slip", get(payroll_slip_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps an engine outcome onto a JSON response, logging failures.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    status: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => json_response(status, body),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Request failed"
            );
            error_response(err.into())
        }
    }
}

/// Unwraps a JSON body or builds the 400 response for it.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(error_response(ApiErrorResponse::bad_request(error)))
}

/// Unwraps a query string or builds the 400 response for it.
fn parse_query<T>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, Response> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Invalid query string"
            );
            Err(error_response(ApiErrorResponse::bad_request(
                ApiError::validation_error(body_text),
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let (date, timestamp) = request.resolve();
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        %date,
        "Processing clock-in"
    );
    respond(
        correlation_id,
        StatusCode::CREATED,
        state
            .attendance()
            .clock_in(request.employee_id, date, timestamp),
    )
}

async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let (date, timestamp) = request.resolve();
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        %date,
        "Processing clock-out"
    );
    respond(
        correlation_id,
        StatusCode::OK,
        state
            .attendance()
            .clock_out(request.employee_id, date, timestamp),
    )
}

async fn list_attendance_handler(
    State(state): State<AppState>,
    query: Result<Query<AttendanceQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match parse_query(correlation_id, query) {
        Ok(query) => query,
        Err(response) => return response,
    };

    respond(
        correlation_id,
        StatusCode::OK,
        state
            .attendance()
            .get_by_employee(query.employee_id, query.month, query.year),
    )
}

async fn attendance_report_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match parse_query(correlation_id, query) {
        Ok(query) => query,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        start_date = %query.start_date,
        end_date = %query.end_date,
        "Building attendance report"
    );
    let attendance = state.attendance();
    let report = attendance
        .get_report(query.start_date, query.end_date)
        .map(|records| AttendanceReport {
            summaries: attendance.summarize(&records),
            records,
        });
    respond(correlation_id, StatusCode::OK, report)
}

async fn manual_attendance_handler(
    State(state): State<AppState>,
    payload: Result<Json<ManualAttendance>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let entry = match parse_body(correlation_id, payload) {
        Ok(entry) => entry,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = entry.employee_id,
        date = %entry.date,
        "Processing manual attendance"
    );
    respond(
        correlation_id,
        StatusCode::CREATED,
        state.attendance().create_manual(entry),
    )
}

// ---------------------------------------------------------------------------
// Leave
// ---------------------------------------------------------------------------

async fn create_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewLeaveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        leave_type = %request.leave_type,
        "Processing leave request"
    );
    respond(
        correlation_id,
        StatusCode::CREATED,
        state.leave().create_request(request),
    )
}

async fn list_leaves_handler(
    State(state): State<AppState>,
    query: Result<Query<LeaveListQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let (filter, page) = match parse_query(correlation_id, query) {
        Ok(query) => query.into_parts(),
        Err(response) => return response,
    };

    respond(correlation_id, StatusCode::OK, state.leave().list(filter, page))
}

async fn get_leave_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    respond(Uuid::new_v4(), StatusCode::OK, state.leave().get(id))
}

async fn approve_leave_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<ApproveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        leave_id = id,
        approver_id = request.approver_id,
        decision = ?request.status,
        "Processing leave decision"
    );
    respond(
        correlation_id,
        StatusCode::OK,
        state
            .leave()
            .approve(id, request.approver_id, request.status),
    )
}

async fn leave_balance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<u64>,
) -> Response {
    respond(
        Uuid::new_v4(),
        StatusCode::OK,
        state.leave().get_balance(employee_id),
    )
}

// ---------------------------------------------------------------------------
// Payroll
// ---------------------------------------------------------------------------

async fn generate_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        month = request.month,
        year = request.year,
        "Processing payroll generation"
    );
    let generated = state
        .payroll()
        .generate(request.month, request.year)
        .map(|records| GeneratedPayroll {
            created_count: records.len(),
            records,
        });
    respond(correlation_id, StatusCode::CREATED, generated)
}

async fn list_payroll_handler(
    State(state): State<AppState>,
    query: Result<Query<PayrollListQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let (filter, page) = match parse_query(correlation_id, query) {
        Ok(query) => query.into_parts(),
        Err(response) => return response,
    };

    respond(correlation_id, StatusCode::OK, state.payroll().list(filter, page))
}

async fn payroll_summary_handler(
    State(state): State<AppState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match parse_query(correlation_id, query) {
        Ok(query) => query,
        Err(response) => return response,
    };

    respond(
        correlation_id,
        StatusCode::OK,
        state.payroll().summary(query.month, query.year),
    )
}

async fn get_payroll_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    respond(Uuid::new_v4(), StatusCode::OK, state.payroll().get(id))
}

async fn update_payroll_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<PayrollAdjustment>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let adjustment = match parse_body(correlation_id, payload) {
        Ok(adjustment) => adjustment,
        Err(response) => return response,
    };

    info!(correlation_id = %correlation_id, payroll_id = id, "Processing payroll update");
    respond(
        correlation_id,
        StatusCode::OK,
        state.payroll().update(id, adjustment),
    )
}

async fn process_payment_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, payroll_id = id, "Processing payment");
    respond(
        correlation_id,
        StatusCode::OK,
        state.payroll().process_payment(id),
    )
}

async fn payroll_slip_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.payroll().render_slip(id) {
        Ok(slip) => {
            info!(
                correlation_id = %correlation_id,
                payroll_id = id,
                bytes = slip.bytes.len(),
                "Rendered payroll slip"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, slip.content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename={}", slip.file_name),
                    ),
                ],
                slip.bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Slip download failed"
            );
            error_response(err.into())
        }
    }
}
