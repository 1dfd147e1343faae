// --- File: crates/slotbook_flow/src/api.rs ---
use slotbook_common::{
    ApiClient, ApiError, BookingRequest, BookingResponse, BoxFuture, CalendarApi, Slot,
    SlotsResponse,
};
use tracing::{debug, info};

/// Path of the calendar endpoint, for both slot listing and booking.
pub const CALENDLY_PATH: &str = "/api/v1/calendly";

/// [`CalendarApi`] backed by the booking HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCalendarApi {
    client: ApiClient,
}

impl HttpCalendarApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl CalendarApi for HttpCalendarApi {
    fn fetch_slots(
        &self,
        token: &str,
        from_utc: &str,
        to_utc: &str,
    ) -> BoxFuture<'_, Vec<Slot>, ApiError> {
        let token = token.to_string();
        let params = [
            ("from_utc".to_string(), from_utc.to_string()),
            ("to_utc".to_string(), to_utc.to_string()),
        ];

        Box::pin(async move {
            let params: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let body = self
                .client
                .get(CALENDLY_PATH, &params, Some(&token))
                .await?;
            let response = SlotsResponse::from_body(body)?;
            debug!("Fetched {} slots", response.slots.len());
            Ok(response.slots)
        })
    }

    fn create_booking(&self, request: &BookingRequest) -> BoxFuture<'_, BookingResponse, ApiError> {
        let request = request.clone();

        Box::pin(async move {
            let body = self
                .client
                .post(CALENDLY_PATH, &request, Some(&request.authorization_token))
                .await?;
            // A 2xx means the booking exists, whatever the body looks like.
            let response = BookingResponse::from_body(body);
            info!(
                "Booking created for {} (payment required: {})",
                request.start_utc,
                response.payment_url().is_some()
            );
            Ok(response)
        })
    }
}
