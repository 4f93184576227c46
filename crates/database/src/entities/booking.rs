use models::{
    booking::BookingStatus,
    invoice::InvoiceSource,
    payment::{PaymentLedger, PaymentStatus},
    venue::ServiceType,
};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub quote_id: Uuid,
    pub service_id: Uuid,
    pub service_type: ServiceType,
    pub customer_id: Uuid,
    #[sea_orm(unique)]
    pub booking_reference: String,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub sub_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub discount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub amount_paid: Decimal,
    /// Copied from the service when the booking is created
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub deposit_percentage: Decimal,
    pub payment_status: PaymentStatus,
    pub status: BookingStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn ledger(&self) -> PaymentLedger {
        PaymentLedger {
            total: self.total,
            amount_paid: self.amount_paid,
            deposit_percentage: self.deposit_percentage,
            payment_status: self.payment_status,
            booking_status: self.status,
        }
    }

    pub fn invoice_source(&self) -> InvoiceSource<'_> {
        InvoiceSource {
            booking_reference: &self.booking_reference,
            total: self.total,
            amount_paid: self.amount_paid,
            payment_status: self.payment_status,
            booking_status: self.status,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quote::Entity",
        from = "Column::QuoteId",
        to = "super::quote::Column::Id"
    )]
    Quote,
    #[sea_orm(has_one = "super::invoice::Entity")]
    Invoice,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::quote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quote.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
