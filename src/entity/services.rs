use sea_orm::entity::prelude::*;

use crate::domain::Priced;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: i64,
    pub duration_minutes: i32,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::appointment_services::Entity")]
    AppointmentServices,
}

impl Related<super::appointment_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppointmentServices.def()
    }
}

impl Related<super::appointments::Entity> for Entity {
    fn to() -> RelationDef {
        super::appointment_services::Relation::Appointments.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::appointment_services::Relation::Services.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Priced for Model {
    fn price(&self) -> i64 {
        self.price
    }

    fn duration_minutes(&self) -> i32 {
        self.duration_minutes
    }
}
