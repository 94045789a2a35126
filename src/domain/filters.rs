use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::order::{Order, OrderStatus};

const DEFAULT_MIN_AMOUNT: i64 = 0;
/// Orders above this total are hidden until the caller widens the range.
const DEFAULT_MAX_AMOUNT: i64 = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn accepts(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

/// Inclusive bounds on `order_date`; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// The quick "last N days" presets: from `days` days before `now` up to `now`.
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Self {
        Self {
            start: Some(now - Duration::days(days)),
            end: Some(now),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at <= end)
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

/// Inclusive bounds on `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: BigDecimal,
    pub max: BigDecimal,
}

impl Default for AmountRange {
    fn default() -> Self {
        Self {
            min: BigDecimal::from(DEFAULT_MIN_AMOUNT),
            max: BigDecimal::from(DEFAULT_MAX_AMOUNT),
        }
    }
}

impl AmountRange {
    pub fn new(min: BigDecimal, max: BigDecimal) -> Self {
        Self { min, max }
    }

    /// Build a range from raw text inputs. Unparsable or empty `min` becomes 0;
    /// unparsable, empty or zero `max` becomes 1000.
    pub fn from_inputs(min: &str, max: &str) -> Self {
        let zero = BigDecimal::from(0);
        let min = BigDecimal::from_str(min.trim()).unwrap_or_else(|_| zero.clone());
        let max = match BigDecimal::from_str(max.trim()) {
            Ok(value) if value != zero => value,
            _ => BigDecimal::from(DEFAULT_MAX_AMOUNT),
        };
        Self { min, max }
    }

    pub fn contains(&self, amount: &BigDecimal) -> bool {
        *amount >= self.min && *amount <= self.max
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Every clause must hold for an order to stay in the view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilters {
    pub search: String,
    pub status: StatusFilter,
    pub date_range: DateRange,
    pub amount_range: AmountRange,
}

impl OrderFilters {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether anything narrows the view beyond the default amount range.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.status != StatusFilter::All
            || self.date_range.is_bounded()
            || self.amount_range.min > BigDecimal::from(DEFAULT_MIN_AMOUNT)
            || self.amount_range.max < BigDecimal::from(DEFAULT_MAX_AMOUNT)
    }
}

pub fn matches(order: &Order, filters: &OrderFilters) -> bool {
    if !filters.search.is_empty() {
        let needle = filters.search.to_lowercase();
        let hit = order.id.to_lowercase().contains(&needle)
            || order.customer.name.to_lowercase().contains(&needle)
            || order.customer.email.to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }

    filters.status.accepts(order.status)
        && filters.date_range.contains(order.order_date)
        && filters.amount_range.contains(&order.total)
}
