use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    client::{
        api::ApiClient,
        error::{ClientError, ClientResult},
        session::SessionManager,
    },
    domain::{
        BookingTotals,
        calendar::{BOOKING_WINDOW_DAYS, next_days, within_booking_window},
        totals,
    },
    dto::appointments::CreateAppointmentRequest,
    models::{Appointment, Barber, Service},
};

/// Why a draft cannot be submitted yet. Checked in declaration order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BookingError {
    #[error("Log in to finish your booking.")]
    LoginRequired,

    #[error("Select a barber.")]
    MissingBarber,

    #[error("Select a date.")]
    MissingDate,

    #[error("Select a time.")]
    MissingTime,

    #[error("Select at least one service.")]
    MissingServices,
}

impl From<BookingError> for ClientError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::LoginRequired => ClientError::LoginRequired,
            other => ClientError::Validation(other.to_string()),
        }
    }
}

/// The days offered on the booking screen, starting today.
pub fn booking_dates(today: NaiveDate) -> Vec<NaiveDate> {
    next_days(today, BOOKING_WINDOW_DAYS)
}

/// In-progress booking: barber, date, time and the selected services.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    barber_id: Option<Uuid>,
    date: Option<NaiveDate>,
    time: Option<String>,
    services: Vec<Service>,
    notes: Option<String>,
}

impl BookingDraft {
    /// Starts on the preselected barber when it is listed, otherwise on the first one.
    pub fn start(barbers: &[Barber], preselected: Option<Uuid>) -> Self {
        let barber_id = preselected
            .filter(|id| barbers.iter().any(|b| b.id == *id))
            .or_else(|| barbers.first().map(|b| b.id));
        Self {
            barber_id,
            ..Self::default()
        }
    }

    pub fn barber_id(&self) -> Option<Uuid> {
        self.barber_id
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    // A new barber or day means a new slot list, so the picked time goes.
    pub fn select_barber(&mut self, barber_id: Uuid) {
        if self.barber_id != Some(barber_id) {
            self.barber_id = Some(barber_id);
            self.time = None;
        }
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        if self.date != Some(date) {
            self.date = Some(date);
            self.time = None;
        }
    }

    pub fn select_time(&mut self, time: impl Into<String>) {
        self.time = Some(time.into());
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.trim().is_empty());
    }

    /// Adds the service, or removes it when already selected.
    pub fn toggle_service(&mut self, service: &Service) {
        match self.services.iter().position(|s| s.id == service.id) {
            Some(index) => {
                self.services.remove(index);
            }
            None => self.services.push(service.clone()),
        }
    }

    pub fn is_service_selected(&self, service_id: Uuid) -> bool {
        self.services.iter().any(|s| s.id == service_id)
    }

    pub fn totals(&self) -> BookingTotals {
        totals(&self.services)
    }

    /// Is `date` one of the days this screen offers?
    pub fn is_bookable_date(today: NaiveDate, date: NaiveDate) -> bool {
        within_booking_window(today, date)
    }

    pub fn validate(&self, logged_in: bool) -> Result<(), BookingError> {
        self.to_request(logged_in).map(|_| ())
    }

    pub fn to_request(&self, logged_in: bool) -> Result<CreateAppointmentRequest, BookingError> {
        if !logged_in {
            return Err(BookingError::LoginRequired);
        }
        let barber_id = self.barber_id.ok_or(BookingError::MissingBarber)?;
        let date = self.date.ok_or(BookingError::MissingDate)?;
        let time = self.time.clone().ok_or(BookingError::MissingTime)?;
        if self.services.is_empty() {
            return Err(BookingError::MissingServices);
        }
        Ok(CreateAppointmentRequest {
            barber_id,
            service_ids: self.services.iter().map(|s| s.id).collect(),
            date,
            time,
            notes: self.notes.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Validates the draft against the current session and books it.
/// The draft is cleared once the server accepts it.
pub async fn submit(session: &SessionManager, draft: &mut BookingDraft) -> ClientResult<Appointment> {
    let request = draft.to_request(session.is_authenticated())?;
    let appointment = session.api().create_appointment(&request).await?;
    tracing::info!(appointment_id = %appointment.id, "booking submitted");
    draft.reset();
    Ok(appointment)
}

/// Identifies one slot fetch. Only the newest ticket may update the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTicket(u64);

/// Free times for the selected barber and day.
///
/// Every fetch takes a ticket from [`SlotPicker::begin`]; results carrying
/// an older ticket are dropped, so a slow response for a previous
/// selection can never replace the list for the current one.
#[derive(Debug, Default)]
pub struct SlotPicker {
    generation: u64,
    slots: Vec<String>,
    loading: bool,
    error: Option<String>,
}

impl SlotPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> SlotTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        SlotTicket(self.generation)
    }

    /// Applies a finished fetch. Returns `false` when the ticket is stale.
    pub fn finish(&mut self, ticket: SlotTicket, result: ClientResult<Vec<String>>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(stale = ticket.0, current = self.generation, "dropping stale slots");
            return false;
        }
        self.loading = false;
        match result {
            Ok(slots) => {
                self.slots = slots;
                self.error = None;
            }
            Err(err) => {
                self.slots.clear();
                self.error = Some(err.user_message(LOAD_SLOTS_FAILED));
            }
        }
        true
    }

    /// Fetch and apply in one go, for callers that never overlap requests.
    pub async fn load(&mut self, api: &ApiClient, barber_id: Uuid, date: NaiveDate) -> bool {
        let ticket = self.begin();
        let result = api.available_slots(barber_id, date).await;
        self.finish(ticket, result)
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

const LOAD_SLOTS_FAILED: &str = "Could not load available times. Please try again.";

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::WorkingHours;

    fn service(price: i64, minutes: i32) -> Service {
        Service {
            id: Uuid::new_v4(),
            name: format!("service {price}"),
            description: None,
            category: None,
            price,
            duration_minutes: minutes,
            active: true,
            created_at: Utc::now(),
        }
    }

    fn barber() -> Barber {
        Barber {
            id: Uuid::new_v4(),
            name: "Carlos".into(),
            email: None,
            phone: None,
            photo_url: None,
            specialties: Vec::new(),
            working_hours: WorkingHours::default(),
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn starts_on_preselected_or_first_barber() {
        let barbers = vec![barber(), barber()];
        assert_eq!(
            BookingDraft::start(&barbers, None).barber_id(),
            Some(barbers[0].id)
        );
        assert_eq!(
            BookingDraft::start(&barbers, Some(barbers[1].id)).barber_id(),
            Some(barbers[1].id)
        );
        assert_eq!(
            BookingDraft::start(&barbers, Some(Uuid::new_v4())).barber_id(),
            Some(barbers[0].id)
        );
        assert_eq!(BookingDraft::start(&[], None).barber_id(), None);
    }


    #[test]
    fn toggling_updates_totals() {
        let cut = service(3500, 30);
        let beard = service(2500, 20);
        let mut draft = BookingDraft::default();

        draft.toggle_service(&cut);
        draft.toggle_service(&beard);
        assert_eq!(draft.totals(), BookingTotals { price: 6000, duration_minutes: 50 });
        assert!(draft.is_service_selected(beard.id));

        draft.toggle_service(&cut);
        assert!(!draft.is_service_selected(cut.id));
        assert_eq!(draft.totals(), BookingTotals { price: 2500, duration_minutes: 20 });
        assert_eq!(draft.totals().label(), "R$ 25,00 · 20 min");
    }

    #[test]
    fn validation_reports_first_missing_piece() {
        let mut draft = BookingDraft::default();
        assert_eq!(draft.validate(false), Err(BookingError::LoginRequired));
        assert_eq!(draft.validate(true), Err(BookingError::MissingBarber));

        draft.select_barber(Uuid::new_v4());
        assert_eq!(draft.validate(true), Err(BookingError::MissingDate));

        draft.select_date(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap());
        assert_eq!(draft.validate(true), Err(BookingError::MissingTime));

        draft.select_time("10:30");
        assert_eq!(draft.validate(true), Err(BookingError::MissingServices));

        draft.toggle_service(&service(3500, 30));
        let request = draft.to_request(true).unwrap();
        assert_eq!(request.time, "10:30");
        assert_eq!(request.service_ids.len(), 1);
    }

    #[test]
    fn changing_day_drops_selected_time() {
        let mut draft = BookingDraft::default();
        draft.select_date(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap());
        draft.select_time("09:00");
        draft.select_date(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap());
        assert_eq!(draft.time(), Some("09:00"));
        draft.select_date(NaiveDate::from_ymd_opt(2025, 5, 7).unwrap());
        assert_eq!(draft.time(), None);
    }

    #[test]
    fn missing_field_becomes_validation_message() {
        let err: ClientError = BookingError::MissingTime.into();
        assert_eq!(err.user_message("fallback"), "Select a time.");
        let err: ClientError = BookingError::LoginRequired.into();
        assert!(matches!(err, ClientError::LoginRequired));
    }

    #[test]
    fn stale_slot_results_are_ignored() {
        let mut picker = SlotPicker::new();
        let first = picker.begin();
        let second = picker.begin();

        assert!(picker.finish(second, Ok(vec!["14:00".into()])));
        assert!(!picker.finish(first, Ok(vec!["09:00".into(), "09:30".into()])));
        assert_eq!(picker.slots(), ["14:00".to_string()]);
        assert!(!picker.is_loading());
    }

    #[test]
    fn failed_fetch_clears_slots_and_sets_message() {
        let mut picker = SlotPicker::new();
        let ticket = picker.begin();
        picker.finish(ticket, Ok(vec!["10:00".into()]));

        let ticket = picker.begin();
        picker.finish(ticket, Err(ClientError::EmptyResponse));
        assert!(picker.slots().is_empty());
        assert_eq!(picker.error(), Some(LOAD_SLOTS_FAILED));
    }

    #[test]
    fn offers_seven_days_from_today() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 29).unwrap();
        let days = booking_dates(today);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], today);
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2026, 1, 4).unwrap());
        assert!(BookingDraft::is_bookable_date(today, days[6]));
    }
}
