//! Backend gateway HTTP client.
//!
//! One client covers the IAM, trip, payment, and booking services behind the
//! gateway. Every call except login carries the caller's bearer token; the
//! token belongs to the signed-in operator, not to this server.

use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::editor::SavedTransit;

use super::error::GatewayError;
use super::types::{
    BookingDto, Envelope, LoginRequest, LoginResponse, PageQuery, Paged, StatisticPointDto,
    TransactionDto, TransitPointDto, TransitPointInput, TripDetailsDto, TripDto, TripScheduleDto,
    UserAuthority, WalletCommandDto,
};

/// How much response body to keep in decode errors.
const ERROR_BODY_LIMIT: usize = 500;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the gateway client.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway (no trailing slash)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Create a new config pointing at the given gateway.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Typed client for the backend gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the response body as `T`.
    ///
    /// Maps 401 to `Unauthorized` and 404 to `NotFound`; other non-2xx
    /// statuses become `Api` with a body snippet.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GatewayError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GatewayError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(ERROR_BODY_LIMIT).collect()),
        })
    }

    /// Send a request where only the status matters.
    async fn execute_empty(&self, request: RequestBuilder) -> Result<(), GatewayError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // IAM
    // ------------------------------------------------------------------

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, GatewayError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let request = self.http.post(self.url("/iam/api/v1/auth/login")).json(&body);
        let envelope: Envelope<LoginResponse> = self.execute(request).await?;
        Ok(envelope.data)
    }

    /// Fetch the signed-in account's authorities.
    pub async fn my_authorities(&self, token: &str) -> Result<UserAuthority, GatewayError> {
        let request = self
            .http
            .get(self.url("/iam/api/v1/accounts/me/authorities"))
            .bearer_auth(token);
        let envelope: Envelope<UserAuthority> = self.execute(request).await?;
        Ok(envelope.data)
    }

    // ------------------------------------------------------------------
    // Trips
    // ------------------------------------------------------------------

    /// List trips, paged and keyword-filtered.
    pub async fn list_trips(
        &self,
        token: &str,
        query: &PageQuery,
    ) -> Result<Paged<TripDto>, GatewayError> {
        let request = self
            .http
            .get(self.url("/trip/api/v1/trips"))
            .query(query)
            .bearer_auth(token);
        self.execute(request).await
    }

    /// Fetch a trip with its ordered transits.
    pub async fn get_trip(&self, token: &str, trip_id: &str) -> Result<TripDetailsDto, GatewayError> {
        let request = self
            .http
            .get(self.url(&format!("/trip/api/v1/trips/{trip_id}")))
            .bearer_auth(token);
        let envelope: Envelope<TripDetailsDto> = self.execute(request).await?;
        Ok(envelope.data)
    }

    /// Create a trip.
    pub async fn create_trip(&self, token: &str, trip: &TripDto) -> Result<(), GatewayError> {
        let request = self
            .http
            .post(self.url("/trip/api/v1/trips"))
            .json(trip)
            .bearer_auth(token);
        self.execute_empty(request).await
    }

    /// Update a trip. The gateway uses POST for updates as well.
    pub async fn update_trip(
        &self,
        token: &str,
        trip_id: &str,
        trip: &TripDto,
    ) -> Result<(), GatewayError> {
        let request = self
            .http
            .post(self.url(&format!("/trip/api/v1/trips/{trip_id}")))
            .json(trip)
            .bearer_auth(token);
        self.execute_empty(request).await
    }

    /// Delete a trip.
    pub async fn delete_trip(&self, token: &str, trip_id: &str) -> Result<(), GatewayError> {
        let request = self
            .http
            .delete(self.url(&format!("/trip/api/v1/trips/{trip_id}")))
            .bearer_auth(token);
        self.execute_empty(request).await
    }

    /// Replace a trip's transit list atomically.
    ///
    /// This is the editor's save call: the whole sequence travels as one
    /// payload and the gateway swaps the stored list for it.
    pub async fn replace_trip_transits(
        &self,
        token: &str,
        trip_id: &str,
        transits: &[SavedTransit],
    ) -> Result<(), GatewayError> {
        #[derive(Serialize)]
        struct Body<'a> {
            transits: &'a [SavedTransit],
        }

        let request = self
            .http
            .post(self.url(&format!("/trip/api/v1/trips/{trip_id}/transits")))
            .json(&Body { transits })
            .bearer_auth(token);
        self.execute_empty(request).await
    }

    /// Trip counts by month of `year`, or by year when `year` is `None`.
    pub async fn trip_statistics(
        &self,
        token: &str,
        year: Option<&str>,
    ) -> Result<Vec<StatisticPointDto>, GatewayError> {
        let mut request = self
            .http
            .get(self.url("/trip/api/v1/trips/statistics"))
            .bearer_auth(token);
        if let Some(year) = year {
            request = request.query(&[("year", year)]);
        }
        let envelope: Envelope<Vec<StatisticPointDto>> = self.execute(request).await?;
        Ok(envelope.data)
    }

    // ------------------------------------------------------------------
    // Trip schedules
    // ------------------------------------------------------------------

    /// List a trip's schedules.
    pub async fn list_trip_schedules(
        &self,
        token: &str,
        trip_id: &str,
    ) -> Result<Vec<TripScheduleDto>, GatewayError> {
        let request = self
            .http
            .get(self.url(&format!("/trip/api/v1/trips/{trip_id}/details")))
            .bearer_auth(token);
        let envelope: Envelope<Vec<TripScheduleDto>> = self.execute(request).await?;
        Ok(envelope.data)
    }

    /// Create a schedule for a trip.
    pub async fn create_trip_schedule(
        &self,
        token: &str,
        trip_id: &str,
        schedule: &TripScheduleDto,
    ) -> Result<(), GatewayError> {
        let request = self
            .http
            .post(self.url(&format!("/trip/api/v1/trips/{trip_id}/details")))
            .json(schedule)
            .bearer_auth(token);
        self.execute_empty(request).await
    }

    /// Update a schedule.
    pub async fn update_trip_schedule(
        &self,
        token: &str,
        trip_id: &str,
        schedule_id: &str,
        schedule: &TripScheduleDto,
    ) -> Result<(), GatewayError> {
        let request = self
            .http
            .post(self.url(&format!(
                "/trip/api/v1/trips/{trip_id}/details/{schedule_id}"
            )))
            .json(schedule)
            .bearer_auth(token);
        self.execute_empty(request).await
    }

    /// Delete a schedule.
    pub async fn delete_trip_schedule(
        &self,
        token: &str,
        trip_id: &str,
        schedule_id: &str,
    ) -> Result<(), GatewayError> {
        let request = self
            .http
            .delete(self.url(&format!(
                "/trip/api/v1/trips/{trip_id}/details/{schedule_id}"
            )))
            .bearer_auth(token);
        self.execute_empty(request).await
    }

    // ------------------------------------------------------------------
    // Transit points
    // ------------------------------------------------------------------

    /// List transit points, optionally filtered by kind.
    pub async fn list_transit_points(
        &self,
        token: &str,
        query: &PageQuery,
        kinds: &[&str],
    ) -> Result<Paged<TransitPointDto>, GatewayError> {
        let mut request = self
            .http
            .get(self.url("/trip/api/v1/transit-points"))
            .query(query)
            .bearer_auth(token);
        for kind in kinds {
            request = request.query(&[("types", kind)]);
        }
        self.execute(request).await
    }

    /// Keyword autocomplete for the editor's add dialog.
    ///
    /// A thin wrapper over the list endpoint, sorted by name as the original
    /// picker does.
    pub async fn search_transit_points(
        &self,
        token: &str,
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<TransitPointDto>, GatewayError> {
        let query = PageQuery::page(1, limit)
            .with_keyword(keyword)
            .with_sort("name.asc");
        let paged = self.list_transit_points(token, &query, &[]).await?;
        Ok(paged.data)
    }

    /// Create a transit point.
    pub async fn create_transit_point(
        &self,
        token: &str,
        point: &TransitPointInput,
    ) -> Result<(), GatewayError> {
        let request = self
            .http
            .post(self.url("/trip/api/v1/transit-points"))
            .json(point)
            .bearer_auth(token);
        self.execute_empty(request).await
    }

    /// Update a transit point.
    pub async fn update_transit_point(
        &self,
        token: &str,
        point_id: &str,
        point: &TransitPointInput,
    ) -> Result<(), GatewayError> {
        let request = self
            .http
            .post(self.url(&format!("/trip/api/v1/transit-points/{point_id}")))
            .json(point)
            .bearer_auth(token);
        self.execute_empty(request).await
    }

    /// Delete a transit point.
    pub async fn delete_transit_point(
        &self,
        token: &str,
        point_id: &str,
    ) -> Result<(), GatewayError> {
        let request = self
            .http
            .delete(self.url(&format!("/trip/api/v1/transit-points/{point_id}")))
            .bearer_auth(token);
        self.execute_empty(request).await
    }

    // ------------------------------------------------------------------
    // Wallet commands
    // ------------------------------------------------------------------

    /// List wallet commands, optionally filtered by status.
    pub async fn list_wallet_commands(
        &self,
        token: &str,
        query: &PageQuery,
        statuses: &[&str],
    ) -> Result<Paged<WalletCommandDto>, GatewayError> {
        let mut request = self
            .http
            .get(self.url("/payment/api/v1/wallet-commands"))
            .query(query)
            .bearer_auth(token);
        for status in statuses {
            request = request.query(&[("statuses", status)]);
        }
        self.execute(request).await
    }

    /// Fetch one wallet command.
    pub async fn get_wallet_command(
        &self,
        token: &str,
        command_id: &str,
    ) -> Result<WalletCommandDto, GatewayError> {
        let request = self
            .http
            .get(self.url(&format!("/payment/api/v1/wallet-commands/{command_id}")))
            .bearer_auth(token);
        let envelope: Envelope<WalletCommandDto> = self.execute(request).await?;
        Ok(envelope.data)
    }

    /// Resolve a pending withdrawal: approve (`WAIT_TO_PAY`) or reject
    /// (`REJECTED`). Only valid while the command is `WAIT_TO_RESOLVE`;
    /// the gateway enforces that and answers with the updated command.
    pub async fn resolve_wallet_command(
        &self,
        token: &str,
        command_id: &str,
        status: &str,
    ) -> Result<WalletCommandDto, GatewayError> {
        let request = self
            .http
            .patch(self.url(&format!("/payment/api/v1/wallet-commands/{command_id}")))
            .query(&[("status", status)])
            .bearer_auth(token);
        let envelope: Envelope<WalletCommandDto> = self.execute(request).await?;
        Ok(envelope.data)
    }

    /// Total withdrawn amount over a date range.
    pub async fn wallet_command_statistics(
        &self,
        token: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<StatisticPointDto, GatewayError> {
        let request = self
            .http
            .get(self.url("/payment/api/v1/wallet-commands/statistics"))
            .query(&[("startDate", start_date), ("endDate", end_date)])
            .bearer_auth(token);
        let envelope: Envelope<StatisticPointDto> = self.execute(request).await?;
        Ok(envelope.data)
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// List wallet transactions, optionally filtered by transfer direction.
    pub async fn list_transactions(
        &self,
        token: &str,
        query: &PageQuery,
        transfer_types: &[&str],
    ) -> Result<Paged<TransactionDto>, GatewayError> {
        let mut request = self
            .http
            .get(self.url("/payment/api/v1/transactions"))
            .query(query)
            .bearer_auth(token);
        for transfer in transfer_types {
            request = request.query(&[("transferTypes", transfer)]);
        }
        self.execute(request).await
    }

    /// Summed transaction amount over a date range, per transfer direction.
    pub async fn transaction_statistics(
        &self,
        token: &str,
        start_date: &str,
        end_date: &str,
        transfer_type: &str,
    ) -> Result<StatisticPointDto, GatewayError> {
        let request = self
            .http
            .get(self.url("/payment/api/v1/transactions/statistics"))
            .query(&[
                ("startDate", start_date),
                ("endDate", end_date),
                ("transferTypes", transfer_type),
            ])
            .bearer_auth(token);
        let envelope: Envelope<StatisticPointDto> = self.execute(request).await?;
        Ok(envelope.data)
    }

    // ------------------------------------------------------------------
    // Bookings
    // ------------------------------------------------------------------

    /// List bookings, optionally filtered by status.
    pub async fn list_bookings(
        &self,
        token: &str,
        query: &PageQuery,
        statuses: &[&str],
    ) -> Result<Paged<BookingDto>, GatewayError> {
        let mut request = self
            .http
            .get(self.url("/booking/api/v1/bookings"))
            .query(query)
            .bearer_auth(token);
        for status in statuses {
            request = request.query(&[("statuses", status)]);
        }
        self.execute(request).await
    }

    /// Booking counts by month of `year`, or by year when `year` is `None`.
    pub async fn booking_statistics(
        &self,
        token: &str,
        year: Option<&str>,
    ) -> Result<Vec<StatisticPointDto>, GatewayError> {
        let mut request = self
            .http
            .get(self.url("/booking/api/v1/bookings/statistics"))
            .bearer_auth(token);
        if let Some(year) = year {
            request = request.query(&[("year", year)]);
        }
        let envelope: Envelope<Vec<StatisticPointDto>> = self.execute(request).await?;
        Ok(envelope.data)
    }

    /// Booking revenue by month of `year`, or by year when `year` is `None`.
    pub async fn booking_revenue_statistics(
        &self,
        token: &str,
        year: Option<&str>,
    ) -> Result<Vec<StatisticPointDto>, GatewayError> {
        let mut request = self
            .http
            .get(self.url("/booking/api/v1/bookings/statistics/revenue"))
            .bearer_auth(token);
        if let Some(year) = year {
            request = request.query(&[("year", year)]);
        }
        let envelope: Envelope<Vec<StatisticPointDto>> = self.execute(request).await?;
        Ok(envelope.data)
    }
}
