//! Askama templates for the admin dashboard.

use askama::Template;

use crate::domain::{BookingStatus, BusType, ScheduleStatus, TransitPointKind, Vnd, WalletStatus};
use crate::editor::TransitEntry;
use crate::gateway::{
    BookingDto, PageInfo, StatisticPointDto, TransactionDto, TransitPointDto, TripDto,
    TripScheduleDto, WalletCommandDto,
};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Login page.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Dashboard with revenue charts.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user_name: String,
    pub revenue_total: String,
    pub money_in: String,
    pub money_out: String,
    pub booking_chart: ChartView,
    pub revenue_chart: ChartView,
    pub trip_chart: ChartView,
    pub year: String,
}

/// Paged trips table.
#[derive(Template)]
#[template(path = "trips.html")]
pub struct TripsTemplate {
    pub user_name: String,
    pub trips: Vec<TripView>,
    pub pager: PagerView,
    pub keyword: String,
}

/// The transit-sequence editor page for one trip.
#[derive(Template)]
#[template(path = "transit_editor.html")]
pub struct TransitEditorTemplate {
    pub user_name: String,
    pub trip_id: String,
    pub trip_code: String,
    pub trip_name: String,
    pub session_id: String,
    pub entries: Vec<EntryView>,
}

/// Per-trip schedules table.
#[derive(Template)]
#[template(path = "schedules.html")]
pub struct SchedulesTemplate {
    pub user_name: String,
    pub trip_id: String,
    pub trip_code: String,
    pub schedules: Vec<ScheduleView>,
}

/// Paged transit points table.
#[derive(Template)]
#[template(path = "transit_points.html")]
pub struct TransitPointsTemplate {
    pub user_name: String,
    pub points: Vec<PointView>,
    pub pager: PagerView,
    pub keyword: String,
    pub kind_filter: String,
}

/// Paged bookings table.
#[derive(Template)]
#[template(path = "bookings.html")]
pub struct BookingsTemplate {
    pub user_name: String,
    pub bookings: Vec<BookingView>,
    pub pager: PagerView,
    pub status_filter: String,
}

/// Paged withdrawals table with recent transactions alongside.
#[derive(Template)]
#[template(path = "withdrawals.html")]
pub struct WithdrawalsTemplate {
    pub user_name: String,
    pub withdrawals: Vec<WithdrawalView>,
    pub transactions: Vec<TransactionView>,
    pub pager: PagerView,
    pub status_filter: String,
}

/// Withdrawal detail page with resolve actions and live status.
#[derive(Template)]
#[template(path = "withdrawal_detail.html")]
pub struct WithdrawalDetailTemplate {
    pub user_name: String,
    pub withdrawal: WithdrawalView,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub user_name: String,
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Pagination state for list pages.
#[derive(Debug, Clone)]
pub struct PagerView {
    pub page: u32,
    pub total_pages: u64,
    pub total: u64,
}

impl PagerView {
    pub fn from_page(page: u32, info: &PageInfo) -> Self {
        Self {
            page,
            total_pages: info.total_pages(),
            total: info.total,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64) < self.total_pages
    }

    pub fn prev_page(&self) -> u32 {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next_page(&self) -> u32 {
        self.page + 1
    }
}

/// One bar of a statistics chart.
#[derive(Debug, Clone)]
pub struct ChartBar {
    pub label: String,
    pub value_display: String,
    /// Bar width as a whole percentage of the tallest bar
    pub percent: u32,
}

/// A server-rendered bar chart.
#[derive(Debug, Clone)]
pub struct ChartView {
    pub title: String,
    pub bars: Vec<ChartBar>,
}

impl ChartView {
    /// Build a chart from a statistics series.
    ///
    /// Bar heights are scaled against the series maximum; `as_money` formats
    /// values as VND, otherwise they render as plain counts.
    pub fn from_points(
        title: impl Into<String>,
        points: &[StatisticPointDto],
        as_money: bool,
    ) -> Self {
        let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);

        let bars = points
            .iter()
            .map(|p| {
                let percent = if max > 0.0 {
                    ((p.value / max) * 100.0).round() as u32
                } else {
                    0
                };
                let value_display = if as_money {
                    Vnd::new(p.value as i64).to_string()
                } else {
                    format!("{}", p.value as i64)
                };
                ChartBar {
                    label: p.key.clone(),
                    value_display,
                    percent,
                }
            })
            .collect();

        Self {
            title: title.into(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Trip row view model.
#[derive(Debug, Clone)]
pub struct TripView {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
}

impl TripView {
    pub fn from_dto(dto: &TripDto) -> Self {
        Self {
            id: dto.id.clone(),
            code: dto.code.clone(),
            name: dto.name.clone(),
            description: dto.description.clone().unwrap_or_default(),
            created_at: dto.created_at.clone().unwrap_or_default(),
        }
    }
}

/// Transit entry view model for the editor's initial render.
#[derive(Debug, Clone)]
pub struct EntryView {
    pub key: String,
    pub transit_point_id: String,
    pub name: String,
    pub address: String,
    pub arrival_time: String,
    pub transit_type: String,
    pub transit_type_label: String,
    pub transit_order: usize,
}

impl EntryView {
    pub fn from_entry(entry: &TransitEntry) -> Self {
        Self {
            key: entry.key.encode(),
            transit_point_id: entry.transit_point_id.clone(),
            name: entry.point.name.clone(),
            address: entry.point.address.clone(),
            arrival_time: entry.arrival_time.to_string(),
            transit_type: entry.transit_type.as_str().to_string(),
            transit_type_label: entry.transit_type.label().to_string(),
            transit_order: entry.transit_order,
        }
    }
}

/// Trip schedule view model.
#[derive(Debug, Clone)]
pub struct ScheduleView {
    pub id: String,
    pub from_date: String,
    pub to_date: String,
    pub price: String,
    pub bus_type: String,
    pub bus_type_label: String,
    pub status: String,
    pub is_active: bool,
}

impl ScheduleView {
    pub fn from_dto(dto: &TripScheduleDto) -> Self {
        // Unknown enum values from the gateway render as-is rather than 500ing
        let bus_type_label = BusType::parse(&dto.bus_type)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|_| dto.bus_type.clone());
        let is_active = ScheduleStatus::parse(&dto.status)
            .map(|s| s == ScheduleStatus::Active)
            .unwrap_or(false);

        Self {
            id: dto.id.clone().unwrap_or_default(),
            from_date: dto.from_date.clone(),
            to_date: dto.to_date.clone(),
            price: Vnd::new(dto.price).to_string(),
            bus_type: dto.bus_type.clone(),
            bus_type_label,
            status: dto.status.clone(),
            is_active,
        }
    }
}

/// Transit point row view model.
#[derive(Debug, Clone)]
pub struct PointView {
    pub id: String,
    pub name: String,
    pub address: String,
    pub hotline: String,
    pub kind: String,
    pub kind_label: String,
}

impl PointView {
    pub fn from_dto(dto: &TransitPointDto) -> Self {
        let kind = dto.kind.clone().unwrap_or_default();
        let kind_label = TransitPointKind::parse(&kind)
            .map(|k| k.label().to_string())
            .unwrap_or_else(|_| kind.clone());

        Self {
            id: dto.id.clone(),
            name: dto.name.clone(),
            address: dto.address.clone(),
            hotline: dto.hotline.clone(),
            kind,
            kind_label,
        }
    }
}

/// Booking row view model, including both trip legs.
#[derive(Debug, Clone)]
pub struct BookingView {
    pub id: String,
    pub code: String,
    pub status: String,
    pub status_label: String,
    pub total_price: String,
    pub created_at: String,
    pub passenger: String,
    pub departure_route: String,
    pub departure_seats: String,
    pub return_route: String,
    pub return_seats: String,
}

impl BookingView {
    pub fn from_dto(dto: &BookingDto) -> Self {
        let status_label = BookingStatus::parse(&dto.status)
            .map(|s| s.label().to_string())
            .unwrap_or_else(|_| dto.status.clone());

        let seats = |leg: &crate::gateway::BookingTripDto| {
            leg.tickets
                .iter()
                .filter_map(|t| t.seat_number.clone())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let (return_route, return_seats) = match &dto.return_trip {
            Some(leg) => (leg.route.clone(), seats(leg)),
            None => (String::new(), String::new()),
        };

        Self {
            id: dto.id.clone(),
            code: dto.code.clone(),
            status: dto.status.clone(),
            status_label,
            total_price: Vnd::new(dto.total_price).to_string(),
            created_at: dto.created_at.clone().unwrap_or_default(),
            passenger: dto.departure_trip.full_name.clone(),
            departure_route: dto.departure_trip.route.clone(),
            departure_seats: seats(&dto.departure_trip),
            return_route,
            return_seats,
        }
    }

    pub fn has_return(&self) -> bool {
        !self.return_route.is_empty()
    }
}

/// Withdrawal (wallet command) view model.
#[derive(Debug, Clone)]
pub struct WithdrawalView {
    pub id: String,
    pub code: String,
    pub created_by: String,
    pub created_at: String,
    pub amount: String,
    pub bank_code: String,
    pub account_number: String,
    pub receiver_name: String,
    pub status: String,
    pub status_label: String,
    pub payment_link: String,
    pub can_resolve: bool,
    pub awaiting_payment: bool,
}

impl WithdrawalView {
    pub fn from_dto(dto: &WalletCommandDto) -> Self {
        let parsed = WalletStatus::parse(&dto.status).ok();
        let status_label = parsed
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| dto.status.clone());

        Self {
            id: dto.id.clone(),
            code: dto.code.clone(),
            created_by: dto.created_by.clone(),
            created_at: dto.created_at.clone().unwrap_or_default(),
            amount: Vnd::new(dto.amount).to_string(),
            bank_code: dto.bank_code.clone(),
            account_number: dto.account_number.clone(),
            receiver_name: dto.receiver_name.clone(),
            status: dto.status.clone(),
            status_label,
            payment_link: dto.payment_link.clone().unwrap_or_default(),
            can_resolve: parsed == Some(WalletStatus::WaitToResolve),
            awaiting_payment: parsed == Some(WalletStatus::WaitToPay),
        }
    }

    pub fn has_payment_link(&self) -> bool {
        !self.payment_link.is_empty()
    }
}

/// Transaction row view model.
#[derive(Debug, Clone)]
pub struct TransactionView {
    pub code: String,
    pub amount: String,
    pub direction_label: String,
    pub is_inbound: bool,
    pub created_at: String,
}

impl TransactionView {
    pub fn from_dto(dto: &TransactionDto) -> Self {
        let parsed = crate::domain::TransferType::parse(&dto.transfer_type).ok();
        let direction_label = parsed
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| dto.transfer_type.clone());

        Self {
            code: dto.code.clone(),
            amount: Vnd::new(dto.transfer_amount).to_string(),
            direction_label,
            is_inbound: parsed == Some(crate::domain::TransferType::In),
            created_at: dto.created_at.clone().unwrap_or_default(),
        }
    }
}
