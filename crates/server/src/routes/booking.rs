use crate::{
    dtos::{
        booking::{
            BookingDetailResponse, BookingQueryParams, BookingResponse, PaymentOptionsResponse,
            PaymentReceiptResponse, RecordPaymentRequest, UpdateBookingRequest,
        },
        pagination::Paginated,
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
use database::services::{ListScope, booking::BookingService};
use uuid::Uuid;

/// Lists the bookings visible to the caller
#[utoipa::path(
    get,
    path = "/bookings",
    params(BookingQueryParams),
    responses(
        (status = 200, description = "Page of bookings", body = Paginated<BookingResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<BookingQueryParams>,
) -> Result<Json<Paginated<BookingResponse>>, ApiError> {
    let (filter, request) = params.into_parts()?;
    let scope = ListScope::for_actor(&state.db, &user.actor()).await?;

    let page = BookingService::list(&state.db, &scope, filter, request).await?;
    Ok(Json(page.into()))
}

/// Gets a booking with its invoice and payments
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = BookingDetailResponse),
        (status = 403, description = "Not a party to this booking", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingDetailResponse>, ApiError> {
    let detail = BookingService::detail(&state.db, &user.actor(), id).await?;
    Ok(Json(detail.into()))
}

/// Deposit and full-payment amounts, and which of them may be paid now
#[utoipa::path(
    get,
    path = "/bookings/{id}/paymentOptions",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Payment options", body = PaymentOptionsResponse),
        (status = 403, description = "Not a party to this booking", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Bookings"
)]
pub async fn payment_options(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentOptionsResponse>, ApiError> {
    let options = BookingService::payment_options(&state.db, &user.actor(), id).await?;
    Ok(Json(options.into()))
}

/// Pays the deposit or everything still owed
#[utoipa::path(
    post,
    path = "/bookings/{id}/payments",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = RecordPaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentReceiptResponse),
        (status = 403, description = "Not a party to this booking", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody),
        (status = 409, description = "Payment option not available", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Bookings"
)]
pub async fn record_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentReceiptResponse>), ApiError> {
    let receipt = BookingService::record_payment(&state.db, &user.actor(), id, body.kind).await?;
    Ok((StatusCode::CREATED, Json(receipt.into())))
}

/// Cancels or completes a booking
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponse),
        (status = 403, description = "Not a manager of this service", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody),
        (status = 409, description = "Status change not allowed", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Bookings"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = BookingService::update_status(&state.db, &user.actor(), id, body.action).await?;
    Ok(Json(booking.into()))
}
