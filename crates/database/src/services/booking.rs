use super::{
    ListScope, fetch_page, invoice::InvoiceService, non_blank, quote::QuoteService,
    search_condition, time_slot::TimeSlotService, venue::VenueService,
};
use crate::{
    ServiceError,
    entities::{booking, invoice, payment},
};
use chrono::Utc;
use models::{
    booking::{BookingAction, BookingStatus},
    lifecycle::Lifecycle,
    listing::{Page, PageRequest},
    payment::{PaymentKind, PaymentOptions, PaymentStatus, apply_payment},
    policy::Actor,
    venue::ServiceType,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub service_type: Option<ServiceType>,
    pub service_id: Option<Uuid>,
    /// Matched against the booking reference
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetail {
    pub booking: booking::Model,
    pub invoice: Option<invoice::Model>,
    pub payments: Vec<payment::Model>,
}

/// Result of a recorded payment
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub payment: payment::Model,
    pub booking: booking::Model,
    pub invoice: invoice::Model,
}

pub struct BookingService;

impl BookingService {
    pub async fn list(
        db: &DatabaseConnection,
        scope: &ListScope,
        filter: BookingFilter,
        request: PageRequest,
    ) -> Result<Page<booking::Model>, ServiceError> {
        let mut condition =
            scope.condition(booking::Column::CustomerId, booking::Column::ServiceId);

        if let Some(status) = filter.status {
            condition = condition.add(booking::Column::Status.eq(status));
        }
        if let Some(payment_status) = filter.payment_status {
            condition = condition.add(booking::Column::PaymentStatus.eq(payment_status));
        }
        if let Some(service_type) = filter.service_type {
            condition = condition.add(booking::Column::ServiceType.eq(service_type));
        }
        if let Some(service_id) = filter.service_id {
            condition = condition.add(booking::Column::ServiceId.eq(service_id));
        }
        if let Some(search) = non_blank(&filter.search) {
            condition = condition.add(search_condition(
                &[booking::Column::BookingReference],
                search,
            ));
        }

        let query = booking::Entity::find()
            .filter(condition)
            .order_by_desc(booking::Column::CreatedAt);

        fetch_page(db, query, request).await
    }

    /// A booking the actor is a party to
    pub async fn get<C: ConnectionTrait>(
        db: &C,
        actor: &Actor,
        id: Uuid,
    ) -> Result<booking::Model, ServiceError> {
        let booking = booking::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("booking", id))?;

        Self::ensure_can_view(db, actor, &booking).await?;
        Ok(booking)
    }

    pub async fn detail(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
    ) -> Result<BookingDetail, ServiceError> {
        let booking = Self::get(db, actor, id).await?;
        let invoice = InvoiceService::find_for_booking(db, booking.id).await?;
        let payments = payment::Entity::find()
            .filter(payment::Column::BookingId.eq(booking.id))
            .order_by_asc(payment::Column::CreatedAt)
            .all(db)
            .await?;

        Ok(BookingDetail {
            booking,
            invoice,
            payments,
        })
    }

    pub async fn payment_options(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
    ) -> Result<PaymentOptions, ServiceError> {
        let booking = Self::get(db, actor, id).await?;
        Ok(PaymentOptions::compute(&booking.ledger())?)
    }

    /// Records a deposit or full payment, moving the booking to BOOKED and
    /// keeping its invoice in step
    pub async fn record_payment(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
        kind: PaymentKind,
    ) -> Result<PaymentReceipt, ServiceError> {
        let txn = db.begin().await?;

        let booking = booking::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("booking", id))?;
        Self::ensure_can_view(&txn, actor, &booking).await?;

        let ledger = booking.ledger();
        let amount = match PaymentOptions::compute(&ledger)?.amount_for(kind) {
            Ok(amount) => amount,
            Err(err) => {
                log::warn!(
                    "Rejected {kind} payment for booking {}: {err}",
                    booking.booking_reference
                );
                return Err(err.into());
            }
        };
        let next = apply_payment(&ledger, amount)?;
        let status = booking.status.transition_or_stay(next.booking_status)?;

        let now = Utc::now().naive_utc();
        let reference = booking.booking_reference.clone();
        let mut active = booking.into_active_model();
        active.amount_paid = Set(next.amount_paid);
        active.payment_status = Set(next.payment_status);
        active.status = Set(status);
        active.updated_at = Set(now);
        let booking = active.update(&txn).await?;

        let payment = payment::ActiveModel {
            id: Set(Uuid::new_v4()),
            booking_id: Set(booking.id),
            kind: Set(kind),
            amount: Set(amount),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let invoice = InvoiceService::sync(&txn, &booking).await?;
        txn.commit().await?;

        log::info!(
            "Recorded {kind} payment of {amount} for booking {reference} ({})",
            booking.payment_status
        );
        Ok(PaymentReceipt {
            payment,
            booking,
            invoice,
        })
    }

    /// Cancels or completes a booking. Cancelling refunds anything paid,
    /// voids the invoice and releases the booked time slots.
    pub async fn update_status(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
        action: BookingAction,
    ) -> Result<booking::Model, ServiceError> {
        let txn = db.begin().await?;

        let booking = booking::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("booking", id))?;
        let service = VenueService::snapshot(&txn, booking.service_type, booking.service_id).await?;
        actor.ensure_can_manage_service(service.owner_id)?;

        let status = booking.status.transition(action.target_status())?;
        let payment_status = if status == BookingStatus::Cancelled {
            PaymentStatus::derive(
                booking.total,
                booking.amount_paid,
                booking.amount_paid > Decimal::ZERO,
            )
        } else {
            booking.payment_status
        };

        let quote_id = booking.quote_id;
        let mut active = booking.into_active_model();
        active.status = Set(status);
        active.payment_status = Set(payment_status);
        active.updated_at = Set(Utc::now().naive_utc());
        let booking = active.update(&txn).await?;

        if status == BookingStatus::Cancelled {
            let slot_ids = QuoteService::time_slot_ids(&txn, quote_id).await?;
            TimeSlotService::release(&txn, slot_ids).await?;
        }
        InvoiceService::sync(&txn, &booking).await?;
        txn.commit().await?;

        log::info!(
            "Booking {} is now {} ({})",
            booking.booking_reference,
            booking.status,
            booking.payment_status
        );
        Ok(booking)
    }

    async fn ensure_can_view<C: ConnectionTrait>(
        db: &C,
        actor: &Actor,
        booking: &booking::Model,
    ) -> Result<(), ServiceError> {
        if actor.is_active && actor.user_id == booking.customer_id {
            return Ok(());
        }

        let service = VenueService::snapshot(db, booking.service_type, booking.service_id).await?;
        Ok(actor.ensure_can_view_record(booking.customer_id, service.owner_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::event_center;
    use chrono::{NaiveDate, NaiveDateTime};
    use models::{invoice::InvoiceStatus, policy::UserRole};
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn actor(role: UserRole) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            role,
            is_active: true,
        }
    }

    fn center(owner_id: Uuid) -> event_center::Model {
        event_center::Model {
            id: Uuid::new_v4(),
            owner_id,
            name: "Eko Hall".to_string(),
            description: None,
            address: "Victoria Island".to_string(),
            capacity_min: 10,
            capacity_max: 500,
            pricing_per_slot: dec!(500),
            deposit_percentage: dec!(20),
            amenities: serde_json::json!([]),
            is_active: true,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn booking(
        customer_id: Uuid,
        service_id: Uuid,
        amount_paid: Decimal,
        payment_status: PaymentStatus,
        status: BookingStatus,
    ) -> booking::Model {
        booking::Model {
            id: Uuid::new_v4(),
            quote_id: Uuid::new_v4(),
            service_id,
            service_type: ServiceType::EventCenter,
            customer_id,
            booking_reference: "BQ-20250601-0A1B2C3D".to_string(),
            sub_total: dec!(1000),
            discount: dec!(0),
            total: dec!(1000),
            amount_paid,
            deposit_percentage: dec!(20),
            payment_status,
            status,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn invoice_for(
        booking: &booking::Model,
        amount_due: Decimal,
        status: InvoiceStatus,
    ) -> invoice::Model {
        invoice::Model {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            invoice_number: format!("INV-{}", booking.booking_reference),
            amount_due,
            currency: "NGN".to_string(),
            issue_date: now().date(),
            due_date: now().date(),
            status,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[tokio::test]
    async fn test_payment_options_for_own_booking() {
        let customer = actor(UserRole::Customer);
        let booking = booking(
            customer.user_id,
            Uuid::new_v4(),
            dec!(0),
            PaymentStatus::Unpaid,
            BookingStatus::Pending,
        );
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booking.clone()]])
            .into_connection();

        let options = BookingService::payment_options(&db, &customer, booking.id)
            .await
            .unwrap();

        assert_eq!(options.deposit_amount, dec!(200));
        assert_eq!(options.remaining_after_deposit, dec!(800));
        assert!(options.deposit_enabled);
        assert!(options.full_enabled);
    }

    #[tokio::test]
    async fn test_strangers_cannot_see_bookings() {
        let stranger = actor(UserRole::Customer);
        let center = center(Uuid::new_v4());
        let booking = booking(
            Uuid::new_v4(),
            center.id,
            dec!(0),
            PaymentStatus::Unpaid,
            BookingStatus::Pending,
        );
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booking.clone()]])
            .append_query_results([vec![center]])
            .into_connection();

        let err = BookingService::get(&db, &stranger, booking.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_record_deposit_books_the_booking() {
        let customer = actor(UserRole::Customer);
        let pending = booking(
            customer.user_id,
            Uuid::new_v4(),
            dec!(0),
            PaymentStatus::Unpaid,
            BookingStatus::Pending,
        );
        let booked = booking::Model {
            amount_paid: dec!(200),
            payment_status: PaymentStatus::Partial,
            status: BookingStatus::Booked,
            ..pending.clone()
        };
        let payment = payment::Model {
            id: Uuid::new_v4(),
            booking_id: pending.id,
            kind: PaymentKind::Deposit,
            amount: dec!(200),
            created_at: now(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![pending.clone()]])
            .append_query_results([vec![booked.clone()]])
            .append_query_results([vec![payment.clone()]])
            .append_query_results([vec![invoice_for(&pending, dec!(1000), InvoiceStatus::Unpaid)]])
            .append_query_results([vec![invoice_for(
                &pending,
                dec!(800),
                InvoiceStatus::PartiallyPaid,
            )]])
            .into_connection();

        let receipt =
            BookingService::record_payment(&db, &customer, pending.id, PaymentKind::Deposit)
                .await
                .unwrap();

        assert_eq!(receipt.payment.amount, dec!(200));
        assert_eq!(receipt.booking.status, BookingStatus::Booked);
        assert_eq!(receipt.invoice.amount_due, dec!(800));
        assert_eq!(receipt.invoice.status, InvoiceStatus::PartiallyPaid);
    }

    #[tokio::test]
    async fn test_second_deposit_is_a_conflict() {
        let customer = actor(UserRole::Customer);
        let partial = booking(
            customer.user_id,
            Uuid::new_v4(),
            dec!(200),
            PaymentStatus::Partial,
            BookingStatus::Booked,
        );
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![partial.clone()]])
            .into_connection();

        let err = BookingService::record_payment(&db, &customer, partial.id, PaymentKind::Deposit)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_customers_cannot_cancel() {
        let customer = actor(UserRole::Customer);
        let center = center(Uuid::new_v4());
        let booking = booking(
            customer.user_id,
            center.id,
            dec!(0),
            PaymentStatus::Unpaid,
            BookingStatus::Pending,
        );
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booking.clone()]])
            .append_query_results([vec![center]])
            .into_connection();

        let err = BookingService::update_status(&db, &customer, booking.id, BookingAction::Cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_pending_booking_cannot_complete() {
        let owner = actor(UserRole::ProviderAdmin);
        let center = center(owner.user_id);
        let booking = booking(
            Uuid::new_v4(),
            center.id,
            dec!(0),
            PaymentStatus::Unpaid,
            BookingStatus::Pending,
        );
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booking.clone()]])
            .append_query_results([vec![center]])
            .into_connection();

        let err = BookingService::update_status(&db, &owner, booking.id, BookingAction::Complete)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn test_cancel_refunds_and_releases_slots() {
        let owner = actor(UserRole::ProviderAdmin);
        let center = center(owner.user_id);
        let booked = booking(
            Uuid::new_v4(),
            center.id,
            dec!(200),
            PaymentStatus::Partial,
            BookingStatus::Booked,
        );
        let cancelled = booking::Model {
            status: BookingStatus::Cancelled,
            payment_status: PaymentStatus::Refunded,
            ..booked.clone()
        };
        let slot_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booked.clone()]])
            .append_query_results([vec![center]])
            .append_query_results([vec![cancelled.clone()]])
            .append_query_results([vec![std::collections::BTreeMap::from([(
                "time_slot_id".to_string(),
                sea_orm::Value::from(slot_id),
            )])]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![invoice_for(
                &booked,
                dec!(800),
                InvoiceStatus::PartiallyPaid,
            )]])
            .append_query_results([vec![invoice_for(&booked, dec!(800), InvoiceStatus::Void)]])
            .into_connection();

        let result = BookingService::update_status(&db, &owner, booked.id, BookingAction::Cancel)
            .await
            .unwrap();
        assert_eq!(result.status, BookingStatus::Cancelled);
        assert_eq!(result.payment_status, PaymentStatus::Refunded);

        let log = db.into_transaction_log();
        let statements: Vec<String> = log
            .iter()
            .flat_map(|txn| txn.statements().iter().map(ToString::to_string))
            .collect();
        assert!(statements
            .iter()
            .any(|sql| sql.contains(r#"SET "is_available" = TRUE"#)));
        assert!(statements.iter().any(|sql| sql.contains("'REFUNDED'")));
    }
}
