use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use labdesk_api_schema::{bookings, lab_tests, reports, users};
use labdesk_domain::booking::{BookingStatus, CollectionType};
use labdesk_domain::user::UserRole;

use crate::domain::repository::{BookingRepository, LabTestRepository, UserRepository};
use crate::domain::types::{Booking, LabTest, Report, User};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Phone.eq(phone))
            .order_by_asc(users::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find user by phone")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_phone_fragment(&self, fragment: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Phone.contains(fragment))
            .order_by_asc(users::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find user by phone fragment")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_u8() as i16),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut model = users::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = name {
            model.name = Set(name.to_owned());
        }
        if let Some(phone) = phone {
            model.phone = Set(phone.to_owned());
        }
        model.update(&self.db).await.context("update user profile")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = UserRole::from_u8(model.role as u8)
        .ok_or_else(|| anyhow::anyhow!("unknown user role {}", model.role))?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        password_hash: model.password_hash,
        role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Lab test repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLabTestRepository {
    pub db: DatabaseConnection,
}

impl LabTestRepository for DbLabTestRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LabTest>, ApiError> {
        let model = lab_tests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find lab test by id")?;
        Ok(model.map(lab_test_from_model))
    }

    async fn list(&self) -> Result<Vec<LabTest>, ApiError> {
        let models = lab_tests::Entity::find()
            .order_by_asc(lab_tests::Column::Name)
            .all(&self.db)
            .await
            .context("list lab tests")?;
        Ok(models.into_iter().map(lab_test_from_model).collect())
    }

    async fn create(&self, test: &LabTest) -> Result<(), ApiError> {
        lab_tests::ActiveModel {
            id: Set(test.id),
            name: Set(test.name.clone()),
            description: Set(test.description.clone()),
            price: Set(test.price),
            created_at: Set(test.created_at),
        }
        .insert(&self.db)
        .await
        .context("create lab test")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = lab_tests::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete lab test")?;
        Ok(result.rows_affected > 0)
    }
}

fn lab_test_from_model(model: lab_tests::Model) -> LabTest {
    LabTest {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        created_at: model.created_at,
    }
}

// ── Booking repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookingRepository {
    pub db: DatabaseConnection,
}

impl BookingRepository for DbBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, ApiError> {
        let model = bookings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find booking by id")?;
        model.map(booking_from_model).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, ApiError> {
        let models = bookings::Entity::find()
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list bookings")?;
        models.into_iter().map(booking_from_model).collect()
    }

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>, ApiError> {
        let models = bookings::Entity::find()
            .filter(bookings::Column::CustomerId.eq(customer_id))
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list bookings for customer")?;
        models.into_iter().map(booking_from_model).collect()
    }

    async fn create(&self, booking: &Booking) -> Result<(), ApiError> {
        bookings::ActiveModel {
            id: Set(booking.id),
            customer_id: Set(booking.customer_id),
            test_id: Set(booking.test_id),
            test_name: Set(booking.test_name.clone()),
            test_price: Set(booking.test_price),
            scheduled_date: Set(booking.scheduled_date),
            time_slot: Set(booking.time_slot.clone()),
            collection_type: Set(booking.collection_type.as_str().to_owned()),
            address: Set(booking.address.clone()),
            status: Set(booking.status.as_str().to_owned()),
            report_id: Set(booking.report_id),
            created_at: Set(booking.created_at),
            updated_at: Set(booking.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create booking")?;
        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<(), ApiError> {
        bookings::ActiveModel {
            id: Set(id),
            status: Set(status.as_str().to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update booking status")?;
        Ok(())
    }

    async fn attach_report(&self, report: &Report) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let report = report.clone();
                Box::pin(async move {
                    insert_report(txn, &report).await?;
                    link_report(txn, &report).await?;
                    Ok(())
                })
            })
            .await
            .context("attach report to booking")?;
        Ok(())
    }

    async fn find_report(&self, booking_id: Uuid) -> Result<Option<Report>, ApiError> {
        let model = reports::Entity::find()
            .filter(reports::Column::BookingId.eq(booking_id))
            .order_by_desc(reports::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find report by booking")?;
        Ok(model.map(report_from_model))
    }
}

async fn insert_report(txn: &DatabaseTransaction, report: &Report) -> Result<(), sea_orm::DbErr> {
    reports::ActiveModel {
        id: Set(report.id),
        booking_id: Set(report.booking_id),
        file_url: Set(report.file_url.clone()),
        stored_name: Set(report.stored_name.clone()),
        remarks: Set(report.remarks.clone()),
        created_at: Set(report.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn link_report(txn: &DatabaseTransaction, report: &Report) -> Result<(), sea_orm::DbErr> {
    bookings::ActiveModel {
        id: Set(report.booking_id),
        report_id: Set(Some(report.id)),
        status: Set(BookingStatus::ReportReady.as_str().to_owned()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .update(txn)
    .await?;
    Ok(())
}

fn booking_from_model(model: bookings::Model) -> Result<Booking, ApiError> {
    let status = BookingStatus::from_str(&model.status)
        .ok_or_else(|| anyhow::anyhow!("unknown booking status {:?}", model.status))?;
    let collection_type = CollectionType::from_str(&model.collection_type)
        .ok_or_else(|| anyhow::anyhow!("unknown collection type {:?}", model.collection_type))?;
    Ok(Booking {
        id: model.id,
        customer_id: model.customer_id,
        test_id: model.test_id,
        test_name: model.test_name,
        test_price: model.test_price,
        scheduled_date: model.scheduled_date,
        time_slot: model.time_slot,
        collection_type,
        address: model.address,
        status,
        report_id: model.report_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn report_from_model(model: reports::Model) -> Report {
    Report {
        id: model.id,
        booking_id: model.booking_id,
        file_url: model.file_url,
        stored_name: model.stored_name,
        remarks: model.remarks,
        created_at: model.created_at,
    }
}
