use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::{
        AppointmentStatus, Role, StatusAction, WorkingHours,
        schedule::{ScheduleCell, ScheduleRow, WeekSchedule},
    },
    dto::{
        appointments::{
            AppointmentDetail, AppointmentList, CreateAppointmentRequest, ReviewRequest,
            UpdateStatusRequest,
        },
        auth::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest},
        barbers::{BarberList, CreateBarberRequest, UpdateBarberRequest},
        reports::{
            BarberPerformance, DashboardStats, MonthlyRevenue, Report, ReportKind,
            ServicePopularity,
        },
        services::{CreateServiceRequest, ServiceGroups, ServiceList, UpdateServiceRequest},
        settings::UpdateSettingsRequest,
    },
    error::ErrorData,
    models::{
        Appointment, Barber, GeneralSettings, NotificationSettings, Review, Service, Settings,
        User,
    },
    response::{ApiResponse, Meta},
    routes::{admin, appointments, auth, barbers, health, params, services},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        auth::update_me,
        barbers::list_barbers,
        barbers::available_slots,
        barbers::get_barber,
        barbers::create_barber,
        barbers::update_barber,
        barbers::delete_barber,
        barbers::week_schedule,
        services::list_services,
        services::services_by_category,
        services::get_service,
        services::create_service,
        services::update_service,
        services::delete_service,
        appointments::list_appointments,
        appointments::create_appointment,
        appointments::get_appointment,
        appointments::update_status,
        appointments::add_review,
        admin::get_settings,
        admin::update_settings,
        admin::reports,
        admin::dashboard
    ),
    components(
        schemas(
            User,
            Role,
            Barber,
            WorkingHours,
            Service,
            Appointment,
            AppointmentStatus,
            StatusAction,
            Review,
            Settings,
            GeneralSettings,
            NotificationSettings,
            WeekSchedule,
            ScheduleRow,
            ScheduleCell,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UpdateProfileRequest,
            CreateBarberRequest,
            UpdateBarberRequest,
            BarberList,
            CreateServiceRequest,
            UpdateServiceRequest,
            ServiceList,
            ServiceGroups,
            CreateAppointmentRequest,
            UpdateStatusRequest,
            ReviewRequest,
            AppointmentList,
            AppointmentDetail,
            UpdateSettingsRequest,
            ReportKind,
            Report,
            MonthlyRevenue,
            ServicePopularity,
            BarberPerformance,
            DashboardStats,
            ErrorData,
            params::Pagination,
            params::SortOrder,
            Meta,
            ApiResponse<User>,
            ApiResponse<AuthResponse>,
            ApiResponse<Barber>,
            ApiResponse<BarberList>,
            ApiResponse<ServiceList>,
            ApiResponse<AppointmentList>,
            ApiResponse<AppointmentDetail>,
            ApiResponse<Settings>,
            ApiResponse<Report>,
            ApiResponse<DashboardStats>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and profile"),
        (name = "Barbers", description = "Barbers, free slots and weekly schedule"),
        (name = "Services", description = "Service catalogue"),
        (name = "Appointments", description = "Booking, status changes and reviews"),
        (name = "Admin", description = "Settings, reports and dashboard"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
