use super::{
    ListScope, fetch_page, invoice::InvoiceService, non_blank, search_condition,
    time_slot::TimeSlotService, venue::VenueService,
};
use crate::{
    ServiceError,
    entities::{booking, quote, quote_time_slot, time_slot},
};
use chrono::Utc;
use models::{
    booking::{BookingStatus, booking_reference},
    invoice::InvoiceTerms,
    lifecycle::Lifecycle,
    listing::{Page, PageRequest},
    money::Financials,
    payment::PaymentStatus,
    policy::Actor,
    quote::{QuoteDecision, QuoteRequest, QuoteStatus},
    time_slot::first_event_date,
    venue::ServiceType,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct QuoteFilter {
    pub status: Option<QuoteStatus>,
    pub service_type: Option<ServiceType>,
    pub service_id: Option<Uuid>,
    /// Matched against billing address and notes
    pub search: Option<String>,
}

/// A quote with its requested time slots and, once approved, its booking
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteDetail {
    pub quote: quote::Model,
    pub time_slots: Vec<time_slot::Model>,
    pub booking: Option<booking::Model>,
}

pub struct QuoteService;

impl QuoteService {
    /// Submits a customer's quote request against an active service
    pub async fn create(
        db: &DatabaseConnection,
        actor: &Actor,
        request: QuoteRequest,
    ) -> Result<QuoteDetail, ServiceError> {
        actor.ensure_can_request_quote()?;
        request.validate()?;

        let txn = db.begin().await?;

        let service = VenueService::snapshot(&txn, request.service_type, request.service_id).await?;
        if !service.is_active {
            return Err(ServiceError::Conflict(format!(
                "{} is not accepting quotes",
                service.name
            )));
        }

        let time_slots = time_slot::Entity::find()
            .filter(time_slot::Column::Id.is_in(request.time_slot_ids.clone()))
            .order_by_asc(time_slot::Column::StartTime)
            .all(&txn)
            .await?;
        Self::check_requested_slots(&request, &time_slots)?;

        let now = Utc::now().naive_utc();
        let quote = quote::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(actor.user_id),
            service_id: Set(request.service_id),
            service_type: Set(request.service_type),
            budget: Set(request.budget),
            status: Set(QuoteStatus::Pending),
            billing_address: Set(request.billing_address.trim().to_string()),
            accept_terms: Set(request.accept_terms),
            accept_cancellation_policy: Set(request.accept_cancellation_policy),
            notes: Set(non_blank(&request.notes).map(str::to_string)),
            rejection_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let links = time_slots.iter().map(|slot| quote_time_slot::ActiveModel {
            id: Set(Uuid::new_v4()),
            quote_id: Set(quote.id),
            time_slot_id: Set(slot.id),
        });
        quote_time_slot::Entity::insert_many(links)
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;

        log::info!(
            "Customer {} requested quote {} for {} {} ({} slots)",
            actor.user_id,
            quote.id,
            quote.service_type,
            quote.service_id,
            time_slots.len()
        );
        Ok(QuoteDetail {
            quote,
            time_slots,
            booking: None,
        })
    }

    pub async fn list(
        db: &DatabaseConnection,
        scope: &ListScope,
        filter: QuoteFilter,
        request: PageRequest,
    ) -> Result<Page<quote::Model>, ServiceError> {
        let mut condition = scope.condition(quote::Column::CustomerId, quote::Column::ServiceId);

        if let Some(status) = filter.status {
            condition = condition.add(quote::Column::Status.eq(status));
        }
        if let Some(service_type) = filter.service_type {
            condition = condition.add(quote::Column::ServiceType.eq(service_type));
        }
        if let Some(service_id) = filter.service_id {
            condition = condition.add(quote::Column::ServiceId.eq(service_id));
        }
        if let Some(search) = non_blank(&filter.search) {
            condition = condition.add(search_condition(
                &[quote::Column::BillingAddress, quote::Column::Notes],
                search,
            ));
        }

        let query = quote::Entity::find()
            .filter(condition)
            .order_by_desc(quote::Column::CreatedAt);

        fetch_page(db, query, request).await
    }

    pub async fn get(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
    ) -> Result<QuoteDetail, ServiceError> {
        let quote = quote::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("quote", id))?;

        let service = VenueService::snapshot(db, quote.service_type, quote.service_id).await?;
        actor.ensure_can_view_record(quote.customer_id, service.owner_id)?;

        Self::detail(db, quote).await
    }

    /// Approves or rejects a pending quote.
    ///
    /// Approval prices the requested slots, creates the booking and its
    /// invoice, and takes the slots off the market, all in one transaction.
    pub async fn decide(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
        decision: QuoteDecision,
        terms: &InvoiceTerms,
    ) -> Result<QuoteDetail, ServiceError> {
        let txn = db.begin().await?;

        let quote = quote::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("quote", id))?;
        let service = VenueService::snapshot(&txn, quote.service_type, quote.service_id).await?;
        actor.ensure_can_manage_service(service.owner_id)?;

        if quote.status.is_terminal() {
            log::warn!("Quote {} was already decided ({})", quote.id, quote.status);
        }
        let status = quote.status.transition(decision.target_status())?;
        let mut time_slots = quote
            .find_related(time_slot::Entity)
            .order_by_asc(time_slot::Column::StartTime)
            .lock_exclusive()
            .all(&txn)
            .await?;

        let mut booking = None;
        let mut active = quote.clone().into_active_model();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().naive_utc());

        match decision {
            QuoteDecision::Approve { discount } => {
                if let Some(taken) = time_slots.iter().find(|slot| !slot.is_available) {
                    return Err(ServiceError::Conflict(format!(
                        "time slot {} is no longer available",
                        taken.id
                    )));
                }

                let financials = Financials::compute(
                    service.terms.unit_price,
                    time_slots.len(),
                    discount.unwrap_or_default(),
                )?;

                let slot_ids = time_slots.iter().map(|slot| slot.id).collect();
                TimeSlotService::reserve(&txn, slot_ids).await?;
                for slot in &mut time_slots {
                    slot.is_available = false;
                }

                let created =
                    Self::create_booking(&txn, &quote, financials, service.terms.deposit_percentage)
                        .await?;

                let today = created.created_at.date();
                let event_date = first_event_date(time_slots.iter().map(|slot| slot.start_time));
                InvoiceService::issue(&txn, &created, terms, today, event_date).await?;

                booking = Some(created);
            }
            QuoteDecision::Reject { reason } => {
                active.rejection_reason = Set(non_blank(&reason).map(str::to_string));
            }
        }

        let quote = active.update(&txn).await?;
        txn.commit().await?;

        match &booking {
            Some(booking) => log::info!(
                "Quote {} approved as booking {} (total {})",
                quote.id,
                booking.booking_reference,
                booking.total
            ),
            None => log::info!("Quote {} rejected", quote.id),
        }

        Ok(QuoteDetail {
            quote,
            time_slots,
            booking,
        })
    }

    /// Ids of the time slots a quote requested
    pub(crate) async fn time_slot_ids<C: ConnectionTrait>(
        db: &C,
        quote_id: Uuid,
    ) -> Result<Vec<Uuid>, ServiceError> {
        Ok(quote_time_slot::Entity::find()
            .select_only()
            .column(quote_time_slot::Column::TimeSlotId)
            .filter(quote_time_slot::Column::QuoteId.eq(quote_id))
            .into_tuple()
            .all(db)
            .await?)
    }

    async fn detail<C: ConnectionTrait>(
        db: &C,
        quote: quote::Model,
    ) -> Result<QuoteDetail, ServiceError> {
        let time_slots = quote
            .find_related(time_slot::Entity)
            .order_by_asc(time_slot::Column::StartTime)
            .all(db)
            .await?;
        let booking = quote.find_related(booking::Entity).one(db).await?;

        Ok(QuoteDetail {
            quote,
            time_slots,
            booking,
        })
    }

    async fn create_booking<C: ConnectionTrait>(
        db: &C,
        quote: &quote::Model,
        financials: Financials,
        deposit_percentage: Decimal,
    ) -> Result<booking::Model, ServiceError> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        Ok(booking::ActiveModel {
            id: Set(id),
            quote_id: Set(quote.id),
            service_id: Set(quote.service_id),
            service_type: Set(quote.service_type),
            customer_id: Set(quote.customer_id),
            booking_reference: Set(booking_reference(id, now.date())),
            sub_total: Set(financials.sub_total),
            discount: Set(financials.discount),
            total: Set(financials.total),
            amount_paid: Set(Decimal::ZERO),
            deposit_percentage: Set(deposit_percentage),
            payment_status: Set(PaymentStatus::Unpaid),
            status: Set(BookingStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?)
    }

    /// Every requested slot must exist, belong to the service and be free
    fn check_requested_slots(
        request: &QuoteRequest,
        time_slots: &[time_slot::Model],
    ) -> Result<(), ServiceError> {
        for id in &request.time_slot_ids {
            let slot = time_slots
                .iter()
                .find(|slot| slot.id == *id)
                .ok_or(ServiceError::not_found("time slot", *id))?;

            if slot.service_id != request.service_id || slot.service_type != request.service_type
            {
                return Err(ServiceError::Validation(format!(
                    "time slot {id} does not belong to the requested service"
                )));
            }
            if !slot.is_available {
                return Err(ServiceError::Conflict(format!(
                    "time slot {id} is not available"
                )));
            }
        }

        Ok(())
    }
}
