use super::{ListScope, booking::BookingService, fetch_page};
use crate::{
    ServiceError,
    entities::{booking, invoice},
};
use chrono::{NaiveDate, Utc};
use models::{
    invoice::{InvoiceDraft, InvoiceStatus, InvoiceTerms, amount_due},
    listing::{Page, PageRequest},
    policy::Actor,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use uuid::Uuid;

pub struct InvoiceService;

impl InvoiceService {
    /// Creates the invoice for a freshly created booking
    pub async fn issue<C: ConnectionTrait>(
        db: &C,
        booking: &booking::Model,
        terms: &InvoiceTerms,
        issue_date: NaiveDate,
        event_date: Option<NaiveDate>,
    ) -> Result<invoice::Model, ServiceError> {
        let draft = InvoiceDraft::derive(booking.invoice_source(), terms, issue_date, event_date);
        let now = Utc::now().naive_utc();

        let invoice = invoice::ActiveModel {
            id: Set(Uuid::new_v4()),
            booking_id: Set(booking.id),
            invoice_number: Set(draft.invoice_number),
            amount_due: Set(draft.amount_due),
            currency: Set(draft.currency),
            issue_date: Set(draft.issue_date),
            due_date: Set(draft.due_date),
            status: Set(draft.status),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        log::info!(
            "Issued invoice {} for booking {}: {} {} due {}",
            invoice.invoice_number,
            booking.booking_reference,
            invoice.amount_due,
            invoice.currency,
            invoice.due_date
        );
        Ok(invoice)
    }

    /// Brings the amount due and status of a booking's invoice up to date
    pub async fn sync<C: ConnectionTrait>(
        db: &C,
        booking: &booking::Model,
    ) -> Result<invoice::Model, ServiceError> {
        let current = Self::find_for_booking(db, booking.id)
            .await?
            .ok_or(ServiceError::not_found("invoice for booking", booking.id))?;

        let source = booking.invoice_source();
        let status = InvoiceStatus::for_booking(source.payment_status, source.booking_status);
        let due = amount_due(source);
        if current.status == status && current.amount_due == due {
            return Ok(current);
        }

        let mut active = current.into_active_model();
        active.amount_due = Set(due);
        active.status = Set(status);
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(active.update(db).await?)
    }

    pub async fn find_for_booking<C: ConnectionTrait>(
        db: &C,
        booking_id: Uuid,
    ) -> Result<Option<invoice::Model>, ServiceError> {
        Ok(invoice::Entity::find()
            .filter(invoice::Column::BookingId.eq(booking_id))
            .one(db)
            .await?)
    }

    /// The invoice of a booking the actor is a party to
    pub async fn get_for_booking(
        db: &DatabaseConnection,
        actor: &Actor,
        booking_id: Uuid,
    ) -> Result<invoice::Model, ServiceError> {
        // Checks that the actor may see the booking
        BookingService::get(db, actor, booking_id).await?;

        Self::find_for_booking(db, booking_id)
            .await?
            .ok_or(ServiceError::not_found("invoice for booking", booking_id))
    }

    pub async fn list(
        db: &DatabaseConnection,
        scope: &ListScope,
        status: Option<InvoiceStatus>,
        request: PageRequest,
    ) -> Result<Page<invoice::Model>, ServiceError> {
        let mut query = invoice::Entity::find()
            .join(
                JoinType::InnerJoin,
                invoice::Relation::Booking.def(),
            )
            .filter(scope.condition(booking::Column::CustomerId, booking::Column::ServiceId))
            .order_by_desc(invoice::Column::IssueDate);

        if let Some(status) = status {
            query = query.filter(invoice::Column::Status.eq(status));
        }

        fetch_page(db, query, request).await
    }
}
