//! Wire types for the backend gateway.
//!
//! Field names mirror the gateway's JSON contracts exactly (camelCase,
//! SCREAMING_SNAKE enums, lowercase transfer types). These structs stay dumb:
//! validation into domain types happens in [`convert`](super::convert).

use serde::{Deserialize, Serialize};

/// Single-object response envelope: `{"data": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Paging metadata attached to list responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page_index: u32,
    pub page_size: u32,
    pub total: u64,
}

impl PageInfo {
    /// Number of pages at this page size.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as u64)
    }
}

/// List response envelope: `{"data": [...], "page": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub page: PageInfo,
}

/// Common list query parameters. Page indexes are 1-based.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_index: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

impl PageQuery {
    /// First page at the given size, no keyword, no sort.
    pub fn page(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
            keyword: None,
            sort_by: None,
        }
    }

    /// Set a search keyword.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Set a sort expression (e.g. `name.asc`).
    pub fn with_sort(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Tokens issued by the IAM service on login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// The signed-in account's granted authorities.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAuthority {
    pub user_id: String,
    #[serde(default)]
    pub granted_permissions: Vec<String>,
    #[serde(default)]
    pub is_root: bool,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserAuthority {
    /// Whether this account may use the admin dashboard.
    pub fn is_admin(&self) -> bool {
        self.is_root || self.role.as_deref() == Some("ADMIN")
    }
}

/// A trip row in list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDto {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A trip with its ordered transits, from the get-by-id endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetailsDto {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub trip_transits: Vec<TripTransitDto>,
}

/// One trip transit as the gateway returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripTransitDto {
    #[serde(default)]
    pub id: Option<String>,
    pub transit_point_id: String,
    #[serde(default)]
    pub transit_point: Option<TransitPointDto>,
    pub arrival_time: String,
    pub transit_order: usize,
    #[serde(rename = "type")]
    pub transit_type: String,
}

/// A transit point from the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitPointDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub hotline: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Body for creating or updating a transit point.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitPointInput {
    pub name: String,
    pub address: String,
    pub hotline: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A trip schedule (per-date-range pricing entry).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripScheduleDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub trip_id: Option<String>,
    pub from_date: String,
    pub to_date: String,
    pub price: i64,
    #[serde(rename = "type")]
    pub bus_type: String,
    pub status: String,
}

/// A withdrawal (wallet) command.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCommandDto {
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub amount: i64,
    #[serde(default)]
    pub bank_code: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub receiver_name: String,
    pub status: String,
    #[serde(default)]
    pub payment_link: Option<String>,
}

/// A wallet transaction row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: serde_json::Value,
    pub code: String,
    pub transfer_amount: i64,
    pub transfer_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One ticket on a booking's trip leg.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    #[serde(default)]
    pub seat_number: Option<String>,
}

/// One leg (departure or return) of a booking.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTripDto {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub tickets: Vec<TicketDto>,
}

/// A booking row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: String,
    pub code: String,
    pub status: String,
    pub total_price: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    pub departure_trip: BookingTripDto,
    #[serde(default)]
    pub return_trip: Option<BookingTripDto>,
}

/// One row of a statistics series (month or year keyed).
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticPointDto {
    pub key: String,
    pub value: f64,
}
