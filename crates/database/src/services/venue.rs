use super::{fetch_page, non_blank, search_condition};
use crate::{
    ServiceError,
    entities::{catering, event_center},
};
use chrono::Utc;
use models::{
    listing::{Page, PageRequest},
    policy::Actor,
    venue::{ServiceType, VenueTerms, validate_name},
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewEventCenter {
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub capacity_min: i32,
    pub capacity_max: i32,
    pub pricing_per_slot: Decimal,
    pub deposit_percentage: Decimal,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewCatering {
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cuisines: Vec<String>,
    pub start_price: Decimal,
    pub capacity_min: i32,
    pub capacity_max: i32,
    pub deposit_percentage: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct VenueFilter {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub owner_id: Option<Uuid>,
}

/// What the quote and booking flows need to know about an event center or catering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSnapshot {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub terms: VenueTerms,
    pub is_active: bool,
}

impl From<event_center::Model> for ServiceSnapshot {
    fn from(center: event_center::Model) -> Self {
        Self {
            terms: center.terms(),
            id: center.id,
            owner_id: center.owner_id,
            name: center.name,
            is_active: center.is_active,
        }
    }
}

impl From<catering::Model> for ServiceSnapshot {
    fn from(catering: catering::Model) -> Self {
        Self {
            terms: catering.terms(),
            id: catering.id,
            owner_id: catering.owner_id,
            name: catering.name,
            is_active: catering.is_active,
        }
    }
}

pub struct VenueService;

impl VenueService {
    pub async fn create_event_center(
        db: &DatabaseConnection,
        actor: &Actor,
        new: NewEventCenter,
    ) -> Result<event_center::Model, ServiceError> {
        actor.ensure_platform_admin()?;
        validate_name(&new.name)?;
        let terms = VenueTerms {
            service_type: ServiceType::EventCenter,
            unit_price: new.pricing_per_slot,
            deposit_percentage: new.deposit_percentage,
            capacity_min: new.capacity_min,
            capacity_max: new.capacity_max,
        };
        terms.validate()?;

        let now = Utc::now().naive_utc();
        let center = event_center::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(new.owner_id),
            name: Set(new.name.trim().to_string()),
            description: Set(new.description),
            address: Set(new.address),
            capacity_min: Set(new.capacity_min),
            capacity_max: Set(new.capacity_max),
            pricing_per_slot: Set(new.pricing_per_slot),
            deposit_percentage: Set(new.deposit_percentage),
            amenities: Set(new.amenities.into()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        log::info!("Created event center {} ({})", center.name, center.id);
        Ok(center)
    }

    pub async fn create_catering(
        db: &DatabaseConnection,
        actor: &Actor,
        new: NewCatering,
    ) -> Result<catering::Model, ServiceError> {
        actor.ensure_platform_admin()?;
        validate_name(&new.name)?;
        let terms = VenueTerms {
            service_type: ServiceType::Catering,
            unit_price: new.start_price,
            deposit_percentage: new.deposit_percentage,
            capacity_min: new.capacity_min,
            capacity_max: new.capacity_max,
        };
        terms.validate()?;

        let now = Utc::now().naive_utc();
        let catering = catering::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(new.owner_id),
            name: Set(new.name.trim().to_string()),
            description: Set(new.description),
            cuisines: Set(new.cuisines.into()),
            start_price: Set(new.start_price),
            capacity_min: Set(new.capacity_min),
            capacity_max: Set(new.capacity_max),
            deposit_percentage: Set(new.deposit_percentage),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        log::info!("Created catering {} ({})", catering.name, catering.id);
        Ok(catering)
    }

    pub async fn list_event_centers(
        db: &DatabaseConnection,
        filter: VenueFilter,
        request: PageRequest,
    ) -> Result<Page<event_center::Model>, ServiceError> {
        let mut condition = Condition::all();

        if let Some(is_active) = filter.is_active {
            condition = condition.add(event_center::Column::IsActive.eq(is_active));
        }
        if let Some(owner_id) = filter.owner_id {
            condition = condition.add(event_center::Column::OwnerId.eq(owner_id));
        }
        if let Some(search) = non_blank(&filter.search) {
            condition = condition.add(search_condition(
                &[event_center::Column::Name, event_center::Column::Address],
                search,
            ));
        }

        let query = event_center::Entity::find()
            .filter(condition)
            .order_by_asc(event_center::Column::Name);

        fetch_page(db, query, request).await
    }

    pub async fn list_caterings(
        db: &DatabaseConnection,
        filter: VenueFilter,
        request: PageRequest,
    ) -> Result<Page<catering::Model>, ServiceError> {
        let mut condition = Condition::all();

        if let Some(is_active) = filter.is_active {
            condition = condition.add(catering::Column::IsActive.eq(is_active));
        }
        if let Some(owner_id) = filter.owner_id {
            condition = condition.add(catering::Column::OwnerId.eq(owner_id));
        }
        if let Some(search) = non_blank(&filter.search) {
            condition = condition.add(search_condition(&[catering::Column::Name], search));
        }

        let query = catering::Entity::find()
            .filter(condition)
            .order_by_asc(catering::Column::Name);

        fetch_page(db, query, request).await
    }

    pub async fn get_event_center<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<event_center::Model, ServiceError> {
        event_center::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("event center", id))
    }

    pub async fn get_catering<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<catering::Model, ServiceError> {
        catering::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("catering", id))
    }

    /// Loads whichever kind of service `service_type` names
    pub async fn snapshot<C: ConnectionTrait>(
        db: &C,
        service_type: ServiceType,
        id: Uuid,
    ) -> Result<ServiceSnapshot, ServiceError> {
        match service_type {
            ServiceType::EventCenter => Self::get_event_center(db, id).await.map(Into::into),
            ServiceType::Catering => Self::get_catering(db, id).await.map(Into::into),
        }
    }

    /// Like `snapshot`, but keeps the service row locked until the transaction ends
    pub async fn snapshot_for_update<C: ConnectionTrait>(
        db: &C,
        service_type: ServiceType,
        id: Uuid,
    ) -> Result<ServiceSnapshot, ServiceError> {
        match service_type {
            ServiceType::EventCenter => event_center::Entity::find_by_id(id)
                .lock_exclusive()
                .one(db)
                .await?
                .map(Into::into)
                .ok_or(ServiceError::not_found("event center", id)),
            ServiceType::Catering => catering::Entity::find_by_id(id)
                .lock_exclusive()
                .one(db)
                .await?
                .map(Into::into)
                .ok_or(ServiceError::not_found("catering", id)),
        }
    }

    /// Ids of every event center and catering owned by `owner_id`
    pub async fn owned_service_ids(
        db: &DatabaseConnection,
        owner_id: Uuid,
    ) -> Result<Vec<Uuid>, ServiceError> {
        let mut ids: Vec<Uuid> = event_center::Entity::find()
            .select_only()
            .column(event_center::Column::Id)
            .filter(event_center::Column::OwnerId.eq(owner_id))
            .into_tuple()
            .all(db)
            .await?;

        let catering_ids: Vec<Uuid> = catering::Entity::find()
            .select_only()
            .column(catering::Column::Id)
            .filter(catering::Column::OwnerId.eq(owner_id))
            .into_tuple()
            .all(db)
            .await?;

        ids.extend(catering_ids);
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::policy::UserRole;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn center(owner_id: Uuid) -> event_center::Model {
        let now = Utc::now().naive_utc();
        event_center::Model {
            id: Uuid::new_v4(),
            owner_id,
            name: "Harbour View Hall".to_string(),
            description: None,
            address: "1 Marina, Lagos".to_string(),
            capacity_min: 50,
            capacity_max: 400,
            pricing_per_slot: dec!(250000),
            deposit_percentage: dec!(30),
            amenities: serde_json::json!(["parking", "stage"]),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_snapshot_event_center() {
        let owner = Uuid::new_v4();
        let center = center(owner);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![center.clone()]])
            .into_connection();

        let snapshot = VenueService::snapshot(&db, ServiceType::EventCenter, center.id)
            .await
            .unwrap();

        assert_eq!(snapshot.owner_id, owner);
        assert_eq!(snapshot.terms.unit_price, dec!(250000));
        assert_eq!(snapshot.terms.deposit_percentage, dec!(30));
        assert_eq!(snapshot.terms.service_type, ServiceType::EventCenter);
    }

    #[tokio::test]
    async fn test_snapshot_missing_catering() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<catering::Model>::new()])
            .into_connection();

        let id = Uuid::new_v4();
        let err = VenueService::snapshot(&db, ServiceType::Catering, id)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::NotFound { entity: "catering", id: missing } if missing == id
        ));
    }

    #[tokio::test]
    async fn test_only_platform_admins_create_centers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let provider = Actor {
            user_id: Uuid::new_v4(),
            role: UserRole::ProviderAdmin,
            is_active: true,
        };
        let new = NewEventCenter {
            owner_id: provider.user_id,
            name: "Grand Hall".to_string(),
            description: None,
            address: "Lekki".to_string(),
            capacity_min: 10,
            capacity_max: 100,
            pricing_per_slot: dec!(1000),
            deposit_percentage: dec!(20),
            amenities: vec![],
        };

        let err = VenueService::create_event_center(&db, &provider, new)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_deposit_percentage() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let admin = Actor {
            user_id: Uuid::new_v4(),
            role: UserRole::PlatformAdmin,
            is_active: true,
        };
        let new = NewCatering {
            owner_id: Uuid::new_v4(),
            name: "Jollof & Co".to_string(),
            description: None,
            cuisines: vec!["Nigerian".to_string()],
            start_price: dec!(50000),
            capacity_min: 10,
            capacity_max: 300,
            deposit_percentage: dec!(150),
        };

        let err = VenueService::create_catering(&db, &admin, new)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
