use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub barber_id: Uuid,
    pub date: Date,
    pub time: String,
    pub total_price: i64,
    pub total_duration: i32,
    pub status: String,
    pub notes: Option<String>,
    pub review_rating: Option<i16>,
    pub review_comment: Option<String>,
    pub reviewed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::barbers::Entity",
        from = "Column::BarberId",
        to = "super::barbers::Column::Id"
    )]
    Barbers,
    #[sea_orm(has_many = "super::appointment_services::Entity")]
    AppointmentServices,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::barbers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Barbers.def()
    }
}

impl Related<super::appointment_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppointmentServices.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        super::appointment_services::Relation::Services.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::appointment_services::Relation::Appointments.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
