use super::{fetch_page, non_blank, search_condition};
use crate::{ServiceError, entities::user};
use chrono::Utc;
use models::{
    listing::{Page, PageRequest},
    policy::{AccessDenied, Actor, UserRole},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    /// Matched against name and email
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

pub struct UserService;

impl UserService {
    pub async fn find_by_subject(
        db: &DatabaseConnection,
        subject: &str,
    ) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .filter(user::Column::Subject.eq(subject))
            .one(db)
            .await?)
    }

    /// Creates the customer account for a token subject seen for the first time
    pub async fn register(
        db: &DatabaseConnection,
        subject: &str,
        new: NewUser,
    ) -> Result<user::Model, ServiceError> {
        let name = new.name.trim();
        let email = new.email.trim().to_lowercase();
        if name.is_empty() {
            return Err(ServiceError::Validation("name must not be blank".to_string()));
        }
        if !email.contains('@') {
            return Err(ServiceError::Validation(format!(
                "{email:?} is not an email address"
            )));
        }

        if Self::find_by_subject(db, subject).await?.is_some() {
            return Err(ServiceError::Conflict("user is already registered".to_string()));
        }

        let now = Utc::now().naive_utc();
        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            subject: Set(subject.to_string()),
            name: Set(name.to_string()),
            email: Set(email),
            role: Set(UserRole::Customer),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        log::info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    pub async fn get(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
    ) -> Result<user::Model, ServiceError> {
        if !actor.can_view_user(id) {
            return Err(AccessDenied("not allowed to view this user").into());
        }

        user::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("user", id))
    }

    pub async fn list(
        db: &DatabaseConnection,
        actor: &Actor,
        filter: UserFilter,
        request: PageRequest,
    ) -> Result<Page<user::Model>, ServiceError> {
        actor.ensure_platform_admin()?;

        let mut condition = Condition::all();
        if let Some(role) = filter.role {
            condition = condition.add(user::Column::Role.eq(role));
        }
        if let Some(is_active) = filter.is_active {
            condition = condition.add(user::Column::IsActive.eq(is_active));
        }
        if let Some(search) = non_blank(&filter.search) {
            condition = condition.add(search_condition(
                &[user::Column::Name, user::Column::Email],
                search,
            ));
        }

        let query = user::Entity::find()
            .filter(condition)
            .order_by_asc(user::Column::Name);

        fetch_page(db, query, request).await
    }

    /// Changes a user's role or activation. Admins cannot lock themselves out.
    pub async fn update(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
        changes: UserUpdate,
    ) -> Result<user::Model, ServiceError> {
        actor.ensure_platform_admin()?;

        if id == actor.user_id
            && (changes.is_active == Some(false)
                || changes.role.is_some_and(|role| role != actor.role))
        {
            log::warn!("Platform admin {id} tried to demote or deactivate themselves");
            return Err(ServiceError::Conflict(
                "administrators cannot demote or deactivate themselves".to_string(),
            ));
        }

        let current = user::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("user", id))?;

        let mut active = current.into_active_model();
        if let Some(role) = changes.role {
            active.role = Set(role);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let user = active.update(db).await?;
        log::info!(
            "User {} is now {} (active: {})",
            user.id,
            user.role,
            user.is_active
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user(role: UserRole) -> user::Model {
        let now = Utc::now().naive_utc();
        user::Model {
            id: Uuid::new_v4(),
            subject: "auth0|ada".to_string(),
            name: "Ada Obi".to_string(),
            email: "ada@example.com".to_string(),
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_register_twice_is_a_conflict() {
        let existing = user(UserRole::Customer);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()]])
            .into_connection();

        let err = UserService::register(
            &db,
            &existing.subject,
            NewUser {
                name: "Ada Obi".to_string(),
                email: "ada@example.com".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_creates_customer() {
        let stored = user(UserRole::Customer);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([vec![stored.clone()]])
            .into_connection();

        let created = UserService::register(
            &db,
            "auth0|ada",
            NewUser {
                name: " Ada Obi ".to_string(),
                email: "Ada@Example.com".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(created, stored);

        let log = db.into_transaction_log();
        let insert = log[1].statements()[0].to_string();
        assert!(insert.contains("'ada@example.com'"));
        assert!(insert.contains("'CUSTOMER'"));
    }

    #[tokio::test]
    async fn test_register_requires_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = UserService::register(
            &db,
            "auth0|ada",
            NewUser {
                name: "Ada".to_string(),
                email: "not-an-email".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_customers_see_only_themselves() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let customer = user(UserRole::Customer).actor();

        let err = UserService::get(&db, &customer, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let err = UserService::list(&db, &customer, UserFilter::default(), PageRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_admin_cannot_deactivate_self() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let admin = user(UserRole::PlatformAdmin).actor();

        let err = UserService::update(
            &db,
            &admin,
            admin.user_id,
            UserUpdate {
                role: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_admin_promotes_user() {
        let admin = user(UserRole::PlatformAdmin).actor();
        let customer = user(UserRole::Customer);
        let promoted = user::Model {
            role: UserRole::ProviderAdmin,
            ..customer.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![customer.clone()]])
            .append_query_results([vec![promoted.clone()]])
            .into_connection();

        let updated = UserService::update(
            &db,
            &admin,
            customer.id,
            UserUpdate {
                role: Some(UserRole::ProviderAdmin),
                is_active: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.role, UserRole::ProviderAdmin);
    }
}
