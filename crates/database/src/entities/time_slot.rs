use models::{time_slot::SlotWindow, venue::ServiceType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "time_slots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_id: Uuid,
    pub service_type: ServiceType,
    pub start_time: DateTime,
    pub end_time: DateTime,
    pub is_available: bool,
    pub created_at: DateTime,
}

impl Model {
    /// Rows are validated on insert, so `start_time < end_time` holds
    pub fn window(&self) -> Option<SlotWindow> {
        SlotWindow::new(self.start_time, self.end_time).ok()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::quote_time_slot::Entity")]
    QuoteTimeSlots,
}

impl Related<super::quote_time_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuoteTimeSlots.def()
    }
}

// Many-to-many relationship with quotes
impl Related<super::quote::Entity> for Entity {
    fn to() -> RelationDef {
        super::quote_time_slot::Relation::Quote.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::quote_time_slot::Relation::TimeSlot.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
