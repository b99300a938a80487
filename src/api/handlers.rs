use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::{ApiError, ErrorResponse};
use crate::logic::{FieldViolation, LoanOperations, LoanRequestValidator, UpdateResult};
use crate::model::{Loan, LoanFields};
use crate::store::traits::LoanStore;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Wire form of a loan. Decimals are written as JSON numbers with their exact
/// scale.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    pub id: Uuid,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub interest_rate: Decimal,
    pub length_in_months: i32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub monthly_payment_amount: Decimal,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            id: loan.id,
            amount: loan.amount,
            interest_rate: loan.interest_rate,
            length_in_months: loan.length_in_months,
            monthly_payment_amount: loan.monthly_payment_amount,
        }
    }
}

fn parse_loan_id(path: Result<Path<String>, PathRejection>) -> Result<Uuid, ApiError> {
    // A segment that does not even decode to UTF-8 is as malformed as a bad UUID.
    let Path(raw) = path.map_err(|rejection| ApiError::InvalidParameter {
        name: "id",
        value: rejection.body_text(),
    })?;

    Uuid::try_parse(&raw).map_err(|_| ApiError::InvalidParameter {
        name: "id",
        value: raw,
    })
}

fn validated_fields(body: Result<Json<Value>, JsonRejection>) -> Result<LoanFields, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => "expected Content-Type: application/json",
            _ => "must be a well-formed JSON object",
        };
        ApiError::Validation(vec![FieldViolation::new("body", message)])
    })?;

    LoanRequestValidator::validate(&body).map_err(ApiError::Validation)
}

pub async fn create_loan<S: LoanStore>(
    State(store): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<LoanResponse>), ApiError> {
    let fields = validated_fields(body)?;
    let loan = LoanOperations::create(&*store, fields).await?;
    Ok((StatusCode::CREATED, Json(loan.into())))
}

pub async fn get_loan<S: LoanStore>(
    State(store): State<AppState<S>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<LoanResponse>, ApiError> {
    let id = parse_loan_id(path)?;
    match LoanOperations::find_by_id(&*store, &id).await? {
        Some(loan) => Ok(Json(loan.into())),
        None => Err(ApiError::NotFound(id)),
    }
}

pub async fn update_loan<S: LoanStore>(
    State(store): State<AppState<S>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LoanResponse>, ApiError> {
    let id = parse_loan_id(path)?;
    let fields = validated_fields(body)?;

    match LoanOperations::update(&*store, &id, fields).await? {
        UpdateResult::Updated(loan) => Ok(Json(loan.into())),
        UpdateResult::NotFound => Err(ApiError::NotFound(id)),
        UpdateResult::Conflict => Err(ApiError::Conflict(id)),
    }
}

pub async fn route_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Resource not found")))
}

pub async fn method_not_allowed() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
}
