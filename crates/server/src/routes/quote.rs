use crate::{
    dtos::{
        pagination::Paginated,
        quote::{
            CreateQuoteRequest, QuoteDetailResponse, QuoteQueryParams, QuoteResponse,
            UpdateQuoteRequest,
        },
    },
    error::{ApiError, ErrorBody},
    extract::CurrentUser,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::{ListScope, quote::QuoteService};
use uuid::Uuid;

/// Requests a quote for time slots of an event center or catering
#[utoipa::path(
    post,
    path = "/requestQuote",
    request_body = CreateQuoteRequest,
    responses(
        (status = 201, description = "Quote submitted", body = QuoteDetailResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 403, description = "Only customers request quotes", body = ErrorBody),
        (status = 404, description = "Service or time slot not found", body = ErrorBody),
        (status = 409, description = "Service inactive or slot unavailable", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Quotes"
)]
pub async fn create_quote(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<QuoteDetailResponse>), ApiError> {
    let detail = QuoteService::create(&state.db, &user.actor(), body.into()).await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// Lists the quotes visible to the caller
#[utoipa::path(
    get,
    path = "/requestQuote",
    params(QuoteQueryParams),
    responses(
        (status = 200, description = "Page of quotes", body = Paginated<QuoteResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Quotes"
)]
pub async fn list_quotes(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<QuoteQueryParams>,
) -> Result<Json<Paginated<QuoteResponse>>, ApiError> {
    let (filter, request) = params.into_parts()?;
    let scope = ListScope::for_actor(&state.db, &user.actor()).await?;

    let page = QuoteService::list(&state.db, &scope, filter, request).await?;
    Ok(Json(page.into()))
}

/// Gets a quote with its requested time slots and booking
#[utoipa::path(
    get,
    path = "/requestQuote/{id}",
    params(
        ("id" = Uuid, Path, description = "Quote ID")
    ),
    responses(
        (status = 200, description = "Quote found", body = QuoteDetailResponse),
        (status = 403, description = "Not a party to this quote", body = ErrorBody),
        (status = 404, description = "Quote not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Quotes"
)]
pub async fn get_quote(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<QuoteDetailResponse>, ApiError> {
    let detail = QuoteService::get(&state.db, &user.actor(), id).await?;
    Ok(Json(detail.into()))
}

/// Approves (creating the booking and invoice) or rejects a pending quote
#[utoipa::path(
    patch,
    path = "/requestQuote/{id}",
    params(
        ("id" = Uuid, Path, description = "Quote ID")
    ),
    request_body = UpdateQuoteRequest,
    responses(
        (status = 200, description = "Decision recorded", body = QuoteDetailResponse),
        (status = 400, description = "Invalid discount", body = ErrorBody),
        (status = 403, description = "Not a manager of this service", body = ErrorBody),
        (status = 404, description = "Quote not found", body = ErrorBody),
        (status = 409, description = "Quote already decided or slot taken", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Quotes"
)]
pub async fn update_quote(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateQuoteRequest>,
) -> Result<Json<QuoteDetailResponse>, ApiError> {
    let detail = QuoteService::decide(
        &state.db,
        &user.actor(),
        id,
        body.into(),
        &state.invoice_terms,
    )
    .await?;
    Ok(Json(detail.into()))
}
