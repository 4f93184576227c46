use super::venue::VenueService;
use crate::{ServiceError, entities::time_slot};
use chrono::{NaiveDateTime, Utc};
use models::{policy::Actor, time_slot::SlotWindow, venue::ServiceType};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewTimeSlot {
    pub service_id: Uuid,
    pub service_type: ServiceType,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

pub struct TimeSlotService;

impl TimeSlotService {
    /// All slots of a service in start order
    pub async fn list_for_service<C: ConnectionTrait>(
        db: &C,
        service_id: Uuid,
    ) -> Result<Vec<time_slot::Model>, ServiceError> {
        Ok(time_slot::Entity::find()
            .filter(time_slot::Column::ServiceId.eq(service_id))
            .order_by_asc(time_slot::Column::StartTime)
            .all(db)
            .await?)
    }

    /// Adds a slot; it must not overlap any existing slot of the same service.
    /// Concurrent creates for one service are serialized on the service row.
    pub async fn create(
        db: &DatabaseConnection,
        actor: &Actor,
        new: NewTimeSlot,
    ) -> Result<time_slot::Model, ServiceError> {
        let window = SlotWindow::new(new.start_time, new.end_time)?;

        let txn = db.begin().await?;

        let service =
            VenueService::snapshot_for_update(&txn, new.service_type, new.service_id).await?;
        actor.ensure_can_manage_service(service.owner_id)?;

        let existing: Vec<SlotWindow> = Self::list_for_service(&txn, new.service_id)
            .await?
            .iter()
            .filter_map(time_slot::Model::window)
            .collect();
        window.ensure_free(&existing)?;

        let slot = time_slot::ActiveModel {
            id: Set(Uuid::new_v4()),
            service_id: Set(new.service_id),
            service_type: Set(new.service_type),
            start_time: Set(window.start()),
            end_time: Set(window.end()),
            is_available: Set(true),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        log::info!(
            "Added time slot {} for {} {} ({} - {})",
            slot.id,
            new.service_type,
            new.service_id,
            slot.start_time,
            slot.end_time
        );
        Ok(slot)
    }

    /// Takes the given slots off the market; a conflict if any is already taken
    pub async fn reserve<C: ConnectionTrait>(db: &C, ids: Vec<Uuid>) -> Result<(), ServiceError> {
        let wanted = ids.len() as u64;
        let taken = Self::set_availability(db, ids, false).await?;

        if taken != wanted {
            log::warn!("Only {taken} of {wanted} time slots were still available");
            return Err(ServiceError::Conflict(
                "a requested time slot was booked by someone else".to_string(),
            ));
        }
        Ok(())
    }

    /// Puts the given slots back on the market, returning how many changed
    pub async fn release<C: ConnectionTrait>(db: &C, ids: Vec<Uuid>) -> Result<u64, DbErr> {
        Self::set_availability(db, ids, true).await
    }

    /// Flips slots that are not yet in the wanted state
    async fn set_availability<C: ConnectionTrait>(
        db: &C,
        ids: Vec<Uuid>,
        available: bool,
    ) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = time_slot::Entity::update_many()
            .col_expr(time_slot::Column::IsAvailable, Expr::value(available))
            .filter(time_slot::Column::Id.is_in(ids))
            .filter(time_slot::Column::IsAvailable.eq(!available))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::event_center;
    use chrono::NaiveDate;
    use models::policy::UserRole;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn center(owner_id: Uuid) -> event_center::Model {
        event_center::Model {
            id: Uuid::new_v4(),
            owner_id,
            name: "Palm Court".to_string(),
            description: None,
            address: "Ikoyi".to_string(),
            capacity_min: 20,
            capacity_max: 200,
            pricing_per_slot: dec!(120000),
            deposit_percentage: dec!(25),
            amenities: serde_json::json!([]),
            is_active: true,
            created_at: at(1, 0),
            updated_at: at(1, 0),
        }
    }

    fn slot(service_id: Uuid, start: NaiveDateTime, end: NaiveDateTime) -> time_slot::Model {
        time_slot::Model {
            id: Uuid::new_v4(),
            service_id,
            service_type: ServiceType::EventCenter,
            start_time: start,
            end_time: end,
            is_available: true,
            created_at: at(1, 0),
        }
    }

    #[tokio::test]
    async fn test_overlapping_slot_is_rejected() {
        let owner = Actor {
            user_id: Uuid::new_v4(),
            role: UserRole::ProviderAdmin,
            is_active: true,
        };
        let center = center(owner.user_id);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![center.clone()]])
            .append_query_results([vec![slot(center.id, at(10, 8), at(10, 14))]])
            .into_connection();

        let err = TimeSlotService::create(
            &db,
            &owner,
            NewTimeSlot {
                service_id: center.id,
                service_type: ServiceType::EventCenter,
                start_time: at(10, 12),
                end_time: at(10, 18),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_locks_the_service() {
        let owner = Actor {
            user_id: Uuid::new_v4(),
            role: UserRole::ProviderAdmin,
            is_active: true,
        };
        let center = center(owner.user_id);
        let created = slot(center.id, at(10, 14), at(10, 18));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![center.clone()]])
            .append_query_results([vec![slot(center.id, at(10, 8), at(10, 14))]])
            .append_query_results([vec![created.clone()]])
            .into_connection();

        let slot = TimeSlotService::create(
            &db,
            &owner,
            NewTimeSlot {
                service_id: center.id,
                service_type: ServiceType::EventCenter,
                start_time: at(10, 14),
                end_time: at(10, 18),
            },
        )
        .await
        .unwrap();
        assert_eq!(slot, created);

        // Lock, overlap check and insert share one transaction
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let statements: Vec<String> = log[0]
            .statements()
            .iter()
            .map(ToString::to_string)
            .collect();
        let lock = statements
            .iter()
            .position(|sql| sql.contains(r#"FROM "event_centers""#) && sql.contains("FOR UPDATE"))
            .unwrap();
        let insert = statements
            .iter()
            .position(|sql| sql.starts_with(r#"INSERT INTO "time_slots""#))
            .unwrap();
        assert!(lock < insert);
    }

    #[tokio::test]
    async fn test_other_providers_cannot_add_slots() {
        let stranger = Actor {
            user_id: Uuid::new_v4(),
            role: UserRole::ProviderAdmin,
            is_active: true,
        };
        let center = center(Uuid::new_v4());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![center.clone()]])
            .into_connection();

        let err = TimeSlotService::create(
            &db,
            &stranger,
            NewTimeSlot {
                service_id: center.id,
                service_type: ServiceType::EventCenter,
                start_time: at(10, 8),
                end_time: at(10, 12),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_reserve_takes_only_free_slots() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            }])
            .into_connection();

        TimeSlotService::reserve(&db, vec![Uuid::new_v4(), Uuid::new_v4()])
            .await
            .unwrap();

        let log = db.into_transaction_log();
        let update = log[0].statements()[0].to_string();
        assert!(update.contains(r#"SET "is_available" = FALSE"#));
        assert!(update.contains(r#""is_available" = TRUE"#));
    }

    #[tokio::test]
    async fn test_reserve_conflicts_when_a_slot_is_gone() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let err = TimeSlotService::reserve(&db, vec![Uuid::new_v4(), Uuid::new_v4()])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_release() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let released = TimeSlotService::release(&db, vec![Uuid::new_v4()])
            .await
            .unwrap();
        assert_eq!(released, 1);

        // Nothing to update never touches the database
        let untouched = TimeSlotService::release(&db, vec![]).await.unwrap();
        assert_eq!(untouched, 0);
    }
}
