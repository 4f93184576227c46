use crate::{
    dtos::invoice::{InvoiceLookup, InvoiceQueryParams},
    error::{ApiError, ErrorBody},
    extract::CurrentUser,
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
};
use database::services::{ListScope, invoice::InvoiceService};

/// Gets the invoice of a booking, or lists the invoices visible to the caller
#[utoipa::path(
    get,
    path = "/invoice",
    params(InvoiceQueryParams),
    responses(
        (status = 200, description = "Invoice, or a page of invoices without bookingId", body = InvoiceLookup),
        (status = 403, description = "Not a party to this booking", body = ErrorBody),
        (status = 404, description = "Booking or invoice not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Invoices"
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<InvoiceQueryParams>,
) -> Result<Json<InvoiceLookup>, ApiError> {
    let actor = user.actor();

    if let Some(booking_id) = params.booking_id {
        let invoice = InvoiceService::get_for_booking(&state.db, &actor, booking_id).await?;
        return Ok(Json(InvoiceLookup::One(invoice.into())));
    }

    let request = params.page()?;
    let scope = ListScope::for_actor(&state.db, &actor).await?;
    let page = InvoiceService::list(&state.db, &scope, params.status, request).await?;
    Ok(Json(InvoiceLookup::Page(page.into())))
}
