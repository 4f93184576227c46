use crate::routes::{
    auth, booking, health, invoice, quote, root, time_slot, user, venue,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::me,
        auth::register,
        quote::create_quote,
        quote::list_quotes,
        quote::get_quote,
        quote::update_quote,
        booking::list_bookings,
        booking::get_booking,
        booking::payment_options,
        booking::record_payment,
        booking::update_booking,
        invoice::get_invoice,
        venue::list_event_centers,
        venue::get_event_center,
        venue::create_event_center,
        venue::list_caterings,
        venue::get_catering,
        venue::create_catering,
        time_slot::list_time_slots,
        time_slot::create_time_slot,
        user::get_user,
        user::update_user,
        user::list_users
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Authentication", description = "The caller's own account"),
        (name = "Quotes", description = "Quote requests and provider decisions"),
        (name = "Bookings", description = "Bookings, payment options and payments"),
        (name = "Invoices", description = "Invoices derived from bookings"),
        (name = "Services", description = "Event centers and caterings"),
        (name = "Time Slots", description = "Bookable time slots of a service"),
        (name = "Users", description = "User administration"),
    ),
    info(
        title = "Banquet API",
        version = "1.0.0",
        description = "Event center and catering marketplace API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
