pub mod auth;
pub mod booking;
pub mod health;
pub mod invoice;
pub mod quote;
pub mod root;
pub mod time_slot;
pub mod user;
pub mod venue;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes reachable without a bearer token
pub fn public() -> Router<AppState> {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
}

/// Routes that need the verified token claims
pub fn protected() -> Router<AppState> {
    Router::new()
        .route("/me", get(auth::me).post(auth::register))
        .route(
            "/requestQuote",
            get(quote::list_quotes).post(quote::create_quote),
        )
        .route(
            "/requestQuote/{id}",
            get(quote::get_quote).patch(quote::update_quote),
        )
        .route("/bookings", get(booking::list_bookings))
        .route(
            "/bookings/{id}",
            get(booking::get_booking).patch(booking::update_booking),
        )
        .route(
            "/bookings/{id}/paymentOptions",
            get(booking::payment_options),
        )
        .route("/bookings/{id}/payments", post(booking::record_payment))
        .route("/invoice", get(invoice::get_invoice))
        .route(
            "/eventCenter",
            get(venue::list_event_centers).post(venue::create_event_center),
        )
        .route("/eventCenter/{id}", get(venue::get_event_center))
        .route(
            "/catering",
            get(venue::list_caterings).post(venue::create_catering),
        )
        .route("/catering/{id}", get(venue::get_catering))
        .route(
            "/timeSlots",
            get(time_slot::list_time_slots).post(time_slot::create_time_slot),
        )
        .route("/users", get(user::list_users))
        .route("/user/{id}", get(user::get_user).patch(user::update_user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use models::invoice::InvoiceTerms;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;

    fn state() -> AppState {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        AppState::new(db, InvoiceTerms::default())
    }

    fn app() -> Router {
        public().merge(protected()).with_state(state())
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_root() {
        let (status, _) = send(get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_routes_need_claims() {
        for uri in [
            "/me",
            "/requestQuote",
            "/bookings",
            "/invoice?bookingId=00000000-0000-0000-0000-000000000000",
        ] {
            let (status, body) = send(get_request(uri)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");

            let body: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(body["error"], "Unauthorized");
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_payment_is_rejected_before_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/bookings/00000000-0000-0000-0000-000000000000/payments")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"kind":"DEPOSIT"}"#))
            .unwrap();

        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = send(get_request("/reports")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
