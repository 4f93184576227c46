use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Subject)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp(Users::CreatedAt))
                    .col(timestamp(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create event_centers table
        manager
            .create_table(
                Table::create()
                    .table(EventCenters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventCenters::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventCenters::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(EventCenters::Name).string().not_null())
                    .col(ColumnDef::new(EventCenters::Description).text())
                    .col(ColumnDef::new(EventCenters::Address).string().not_null())
                    .col(ColumnDef::new(EventCenters::CapacityMin).integer().not_null())
                    .col(ColumnDef::new(EventCenters::CapacityMax).integer().not_null())
                    .col(money(EventCenters::PricingPerSlot))
                    .col(percentage(EventCenters::DepositPercentage))
                    .col(ColumnDef::new(EventCenters::Amenities).json().not_null())
                    .col(
                        ColumnDef::new(EventCenters::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp(EventCenters::CreatedAt))
                    .col(timestamp(EventCenters::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-event_centers-owner_id")
                            .from(EventCenters::Table, EventCenters::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create caterings table
        manager
            .create_table(
                Table::create()
                    .table(Caterings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Caterings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Caterings::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Caterings::Name).string().not_null())
                    .col(ColumnDef::new(Caterings::Description).text())
                    .col(ColumnDef::new(Caterings::Cuisines).json().not_null())
                    .col(money(Caterings::StartPrice))
                    .col(ColumnDef::new(Caterings::CapacityMin).integer().not_null())
                    .col(ColumnDef::new(Caterings::CapacityMax).integer().not_null())
                    .col(percentage(Caterings::DepositPercentage))
                    .col(
                        ColumnDef::new(Caterings::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp(Caterings::CreatedAt))
                    .col(timestamp(Caterings::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-caterings-owner_id")
                            .from(Caterings::Table, Caterings::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create time_slots table. service_id points at either an event center or a catering.
        manager
            .create_table(
                Table::create()
                    .table(TimeSlots::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TimeSlots::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TimeSlots::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(TimeSlots::ServiceType).string_len(16).not_null())
                    .col(ColumnDef::new(TimeSlots::StartTime).timestamp().not_null())
                    .col(ColumnDef::new(TimeSlots::EndTime).timestamp().not_null())
                    .col(
                        ColumnDef::new(TimeSlots::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp(TimeSlots::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create quotes table
        manager
            .create_table(
                Table::create()
                    .table(Quotes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Quotes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Quotes::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Quotes::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(Quotes::ServiceType).string_len(16).not_null())
                    .col(money(Quotes::Budget))
                    .col(ColumnDef::new(Quotes::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Quotes::BillingAddress).text().not_null())
                    .col(ColumnDef::new(Quotes::AcceptTerms).boolean().not_null())
                    .col(
                        ColumnDef::new(Quotes::AcceptCancellationPolicy)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Quotes::Notes).text())
                    .col(ColumnDef::new(Quotes::RejectionReason).text())
                    .col(timestamp(Quotes::CreatedAt))
                    .col(timestamp(Quotes::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-quotes-customer_id")
                            .from(Quotes::Table, Quotes::CustomerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create quote_time_slots junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(QuoteTimeSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuoteTimeSlots::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuoteTimeSlots::QuoteId).uuid().not_null())
                    .col(ColumnDef::new(QuoteTimeSlots::TimeSlotId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-quote_time_slots-quote_id")
                            .from(QuoteTimeSlots::Table, QuoteTimeSlots::QuoteId)
                            .to(Quotes::Table, Quotes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-quote_time_slots-time_slot_id")
                            .from(QuoteTimeSlots::Table, QuoteTimeSlots::TimeSlotId)
                            .to(TimeSlots::Table, TimeSlots::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create bookings table. One booking per quote.
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Bookings::QuoteId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Bookings::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::ServiceType).string_len(16).not_null())
                    .col(ColumnDef::new(Bookings::CustomerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Bookings::BookingReference)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(money(Bookings::SubTotal))
                    .col(money(Bookings::Discount))
                    .col(money(Bookings::Total))
                    .col(money(Bookings::AmountPaid))
                    .col(percentage(Bookings::DepositPercentage))
                    .col(ColumnDef::new(Bookings::PaymentStatus).string_len(16).not_null())
                    .col(ColumnDef::new(Bookings::Status).string_len(16).not_null())
                    .col(timestamp(Bookings::CreatedAt))
                    .col(timestamp(Bookings::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-bookings-quote_id")
                            .from(Bookings::Table, Bookings::QuoteId)
                            .to(Quotes::Table, Quotes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create invoices table. One invoice per booking.
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invoices::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Invoices::BookingId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Invoices::InvoiceNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(money(Invoices::AmountDue))
                    .col(ColumnDef::new(Invoices::Currency).string_len(3).not_null())
                    .col(ColumnDef::new(Invoices::IssueDate).date().not_null())
                    .col(ColumnDef::new(Invoices::DueDate).date().not_null())
                    .col(ColumnDef::new(Invoices::Status).string_len(16).not_null())
                    .col(timestamp(Invoices::CreatedAt))
                    .col(timestamp(Invoices::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-invoices-booking_id")
                            .from(Invoices::Table, Invoices::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuoteTimeSlots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quotes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TimeSlots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Caterings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventCenters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

/// Amounts are stored with two decimal places
fn money<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .decimal_len(16, 2)
        .not_null()
        .default(0)
        .to_owned()
}

fn percentage<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .decimal_len(5, 2)
        .not_null()
        .default(0)
        .to_owned()
}

fn timestamp<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .timestamp()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Subject,
    Name,
    Email,
    Role,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum EventCenters {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    Address,
    CapacityMin,
    CapacityMax,
    PricingPerSlot,
    DepositPercentage,
    Amenities,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Caterings {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    Cuisines,
    StartPrice,
    CapacityMin,
    CapacityMax,
    DepositPercentage,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TimeSlots {
    Table,
    Id,
    ServiceId,
    ServiceType,
    StartTime,
    EndTime,
    IsAvailable,
    CreatedAt,
}

#[derive(Iden)]
enum Quotes {
    Table,
    Id,
    CustomerId,
    ServiceId,
    ServiceType,
    Budget,
    Status,
    BillingAddress,
    AcceptTerms,
    AcceptCancellationPolicy,
    Notes,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum QuoteTimeSlots {
    Table,
    Id,
    QuoteId,
    TimeSlotId,
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    QuoteId,
    ServiceId,
    ServiceType,
    CustomerId,
    BookingReference,
    SubTotal,
    Discount,
    Total,
    AmountPaid,
    DepositPercentage,
    PaymentStatus,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Invoices {
    Table,
    Id,
    BookingId,
    InvoiceNumber,
    AmountDue,
    Currency,
    IssueDate,
    DueDate,
    Status,
    CreatedAt,
    UpdatedAt,
}
