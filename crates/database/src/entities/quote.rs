use models::{quote::QuoteStatus, venue::ServiceType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub service_type: ServiceType,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub budget: Decimal,
    pub status: QuoteStatus,
    pub billing_address: String,
    pub accept_terms: bool,
    pub accept_cancellation_policy: bool,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CustomerId",
        to = "super::user::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::quote_time_slot::Entity")]
    QuoteTimeSlots,
    #[sea_orm(has_one = "super::booking::Entity")]
    Booking,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::quote_time_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuoteTimeSlots.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

// Many-to-many relationship with time slots
impl Related<super::time_slot::Entity> for Entity {
    fn to() -> RelationDef {
        super::quote_time_slot::Relation::TimeSlot.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::quote_time_slot::Relation::Quote.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
