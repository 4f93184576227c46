use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Time slots are always listed per service, in start order
        manager
            .create_index(
                Index::create()
                    .name("idx_time_slots_service_id_start_time")
                    .table(TimeSlots::Table)
                    .col(TimeSlots::ServiceId)
                    .col(TimeSlots::StartTime)
                    .to_owned(),
            )
            .await?;

        // Quote listings filter by customer, service and status
        manager
            .create_index(
                Index::create()
                    .name("idx_quotes_customer_id")
                    .table(Quotes::Table)
                    .col(Quotes::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quotes_service_id_status")
                    .table(Quotes::Table)
                    .col(Quotes::ServiceId)
                    .col(Quotes::Status)
                    .to_owned(),
            )
            .await?;

        // Indexes on quote_time_slots for faster many-to-many lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_quote_time_slots_quote_id")
                    .table(QuoteTimeSlots::Table)
                    .col(QuoteTimeSlots::QuoteId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quote_time_slots_time_slot_id")
                    .table(QuoteTimeSlots::Table)
                    .col(QuoteTimeSlots::TimeSlotId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_customer_id")
                    .table(Bookings::Table)
                    .col(Bookings::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_service_id_status")
                    .table(Bookings::Table)
                    .col(Bookings::ServiceId)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_centers_owner_id")
                    .table(EventCenters::Table)
                    .col(EventCenters::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_caterings_owner_id")
                    .table(Caterings::Table)
                    .col(Caterings::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            ("idx_time_slots_service_id_start_time", TimeSlots::Table.into_iden()),
            ("idx_quotes_customer_id", Quotes::Table.into_iden()),
            ("idx_quotes_service_id_status", Quotes::Table.into_iden()),
            ("idx_quote_time_slots_quote_id", QuoteTimeSlots::Table.into_iden()),
            ("idx_quote_time_slots_time_slot_id", QuoteTimeSlots::Table.into_iden()),
            ("idx_bookings_customer_id", Bookings::Table.into_iden()),
            ("idx_bookings_service_id_status", Bookings::Table.into_iden()),
            ("idx_event_centers_owner_id", EventCenters::Table.into_iden()),
            ("idx_caterings_owner_id", Caterings::Table.into_iden()),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum TimeSlots {
    Table,
    ServiceId,
    StartTime,
}

#[derive(Iden)]
enum Quotes {
    Table,
    CustomerId,
    ServiceId,
    Status,
}

#[derive(Iden)]
enum QuoteTimeSlots {
    Table,
    QuoteId,
    TimeSlotId,
}

#[derive(Iden)]
enum Bookings {
    Table,
    CustomerId,
    ServiceId,
    Status,
}

#[derive(Iden)]
enum EventCenters {
    Table,
    OwnerId,
}

#[derive(Iden)]
enum Caterings {
    Table,
    OwnerId,
}
