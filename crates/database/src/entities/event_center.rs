use models::venue::{ServiceType, VenueTerms};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_centers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub capacity_min: i32,
    pub capacity_max: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub pricing_per_slot: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub deposit_percentage: Decimal,
    pub amenities: Json, // JSON array of strings
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn terms(&self) -> VenueTerms {
        VenueTerms {
            service_type: ServiceType::EventCenter,
            unit_price: self.pricing_per_slot,
            deposit_percentage: self.deposit_percentage,
            capacity_min: self.capacity_min,
            capacity_max: self.capacity_max,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
