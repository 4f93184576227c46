pub mod booking;
pub mod invoice;
pub mod quote;
pub mod time_slot;
pub mod user;
pub mod venue;

use crate::ServiceError;
use models::{
    listing::{Page, PageRequest, PaginationMeta},
    policy::{Actor, UserRole},
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, Select,
    sea_query::{Expr, Func, LikeExpr},
};
use uuid::Uuid;

/// Which rows of a listing an actor may see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    /// Everything (platform admins)
    All,
    /// Rows belonging to one customer
    Customer(Uuid),
    /// Rows for services the actor manages
    Services(Vec<Uuid>),
}

impl ListScope {
    pub async fn for_actor(db: &DatabaseConnection, actor: &Actor) -> Result<Self, ServiceError> {
        actor.ensure_active()?;

        Ok(match actor.role {
            UserRole::PlatformAdmin => Self::All,
            UserRole::ProviderAdmin => {
                Self::Services(venue::VenueService::owned_service_ids(db, actor.user_id).await?)
            }
            UserRole::Customer => Self::Customer(actor.user_id),
        })
    }

    /// Restricts a query given its customer and service columns
    pub(crate) fn condition<C: ColumnTrait>(&self, customer_column: C, service_column: C) -> Condition {
        match self {
            Self::All => Condition::all(),
            Self::Customer(id) => Condition::all().add(customer_column.eq(*id)),
            Self::Services(ids) => Condition::all().add(service_column.is_in(ids.clone())),
        }
    }
}

/// Case-insensitive substring match on any of `columns`
pub(crate) fn search_condition<C: ColumnTrait>(columns: &[C], term: &str) -> Condition {
    let pattern = like_pattern(term);

    columns.iter().fold(Condition::any(), |condition, column| {
        condition.add(
            Expr::expr(Func::lower(Expr::col(*column)))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
    })
}

/// `%term%` with the term's own wildcards taken literally
fn like_pattern(term: &str) -> String {
    let mut pattern = String::from("%");
    for c in term.trim().to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Blank search terms count as no search
pub(crate) fn non_blank(term: &Option<String>) -> Option<&str> {
    term.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

/// Counts and fetches one page of `query`
pub(crate) async fn fetch_page<E>(
    db: &DatabaseConnection,
    query: Select<E>,
    request: PageRequest,
) -> Result<Page<E::Model>, ServiceError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    let total_items = query.clone().count(db).await?;
    let items = if request.offset() >= total_items {
        Vec::new()
    } else {
        let paginator = query.paginate(db, request.per_page());
        paginator.fetch_page(request.page() - 1).await? // SeaORM uses 0-based pages
    };

    Ok(Page {
        items,
        pagination: PaginationMeta::new(request, total_items),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::quote;
    use sea_orm::{DatabaseBackend, DbBackend, MockDatabase, QueryFilter, QueryTrait, Value};
    use std::collections::BTreeMap;

    #[test]
    fn test_customer_scope_sql() {
        let customer = Uuid::nil();
        let sql = quote::Entity::find()
            .filter(
                ListScope::Customer(customer)
                    .condition(quote::Column::CustomerId, quote::Column::ServiceId),
            )
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""quotes"."customer_id" = '00000000-0000-0000-0000-000000000000'"#));
    }

    #[test]
    fn test_search_condition_is_case_insensitive() {
        let sql = quote::Entity::find()
            .filter(search_condition(
                &[quote::Column::BillingAddress, quote::Column::Notes],
                " Lekki ",
            ))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#"LOWER("billing_address") LIKE '%lekki%'"#));
        assert!(sql.contains(r#"LOWER("notes") LIKE '%lekki%'"#));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" Lekki "), "%lekki%");
        assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
        assert_eq!(like_pattern("%"), r"%\%%");
    }

    #[test]
    fn test_search_condition_escapes() {
        let sql = quote::Entity::find()
            .filter(search_condition(&[quote::Column::Notes], "%"))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("ESCAPE"));
        assert!(!sql.contains("LIKE '%%%'"));
    }

    #[tokio::test]
    async fn test_page_past_end_skips_the_fetch() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(3)))])]])
            .into_connection();

        let request = PageRequest::new(u64::MAX, 100).unwrap();
        let page = fetch_page(&db, quote::Entity::find(), request).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_items, 3);
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("  hall ".to_string())), Some("hall"));
        assert_eq!(non_blank(&Some("   ".to_string())), None);
        assert_eq!(non_blank(&None), None);
    }
}
