use sea_orm::entity::prelude::*;

/// A scheduled test booking.
///
/// `test_name`/`test_price` are denormalized from the catalog at creation so
/// the booking stays displayable after the test is deleted (`test_id` is
/// nulled by the FK). `report_id` carries no FK — the report row points back
/// at the booking instead.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub test_id: Option<Uuid>,
    pub test_name: String,
    pub test_price: i32,
    pub scheduled_date: chrono::NaiveDate,
    pub time_slot: String,
    pub collection_type: String,
    pub address: Option<String>,
    pub status: String,
    pub report_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CustomerId",
        to = "super::users::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::lab_tests::Entity",
        from = "Column::TestId",
        to = "super::lab_tests::Column::Id"
    )]
    Test,
    #[sea_orm(has_many = "super::reports::Entity")]
    Reports,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::lab_tests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Test.def()
    }
}

impl Related<super::reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
