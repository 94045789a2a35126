use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Builder;

use crate::domain::errors::DomainError;
use crate::domain::order::{Customer, Order, OrderItem, OrderStatus, ShippingAddress};
use crate::domain::ports::OrderSource;

const FIRST_ORDER_NUMBER: u64 = 1000;
const HISTORY_DAYS: i64 = 30;
const MAX_ITEMS: usize = 3;
const MAX_QUANTITY: i32 = 3;
const NOTE_PROBABILITY: f64 = 0.3;
const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

// (id, name, email, phone)
const CUSTOMERS: [(&str, &str, &str, &str); 10] = [
    ("1", "Alice Johnson", "alice.johnson@email.com", "+1-555-0101"),
    ("2", "Bob Smith", "bob.smith@email.com", "+1-555-0102"),
    ("3", "Carol Williams", "carol.williams@email.com", "+1-555-0103"),
    ("4", "David Brown", "david.brown@email.com", "+1-555-0104"),
    ("5", "Eva Davis", "eva.davis@email.com", "+1-555-0105"),
    ("6", "Frank Miller", "frank.miller@email.com", "+1-555-0106"),
    ("7", "Grace Wilson", "grace.wilson@email.com", "+1-555-0107"),
    ("8", "Henry Moore", "henry.moore@email.com", "+1-555-0108"),
    ("9", "Ivy Taylor", "ivy.taylor@email.com", "+1-555-0109"),
    ("10", "Jack Anderson", "jack.anderson@email.com", "+1-555-0110"),
];

// (name, price in cents)
const PRODUCTS: [(&str, i64); 10] = [
    ("Wireless Bluetooth Headphones", 9999),
    ("Smart Watch Series 8", 29999),
    ("Laptop Stand Adjustable", 4999),
    ("USB-C Hub 7-in-1", 7999),
    ("Mechanical Keyboard RGB", 14999),
    ("Wireless Mouse Ergonomic", 6999),
    ("Monitor 27 inch 4K", 39999),
    ("Desk Organizer Bamboo", 2999),
    ("Phone Case Protective", 1999),
    ("Tablet Stand Aluminum", 3999),
];

// (street, city, state, zip, country)
const ADDRESSES: [(&str, &str, &str, &str, &str); 10] = [
    ("123 Main St", "New York", "NY", "10001", "USA"),
    ("456 Oak Ave", "Los Angeles", "CA", "90210", "USA"),
    ("789 Pine Rd", "Chicago", "IL", "60601", "USA"),
    ("321 Elm St", "Houston", "TX", "77001", "USA"),
    ("654 Maple Dr", "Phoenix", "AZ", "85001", "USA"),
    ("987 Cedar Ln", "Philadelphia", "PA", "19101", "USA"),
    ("147 Birch Way", "San Antonio", "TX", "78201", "USA"),
    ("258 Spruce Ct", "San Diego", "CA", "92101", "USA"),
    ("369 Willow St", "Dallas", "TX", "75201", "USA"),
    ("741 Poplar Ave", "San Jose", "CA", "95101", "USA"),
];

/// Random but plausible orders drawn from a fixed catalogue.
///
/// Order numbers come from a counter starting at 1000, so ids never repeat
/// for the lifetime of one source.
#[derive(Debug)]
pub struct MockOrderSource {
    rng: Mutex<StdRng>,
    next_number: AtomicU64,
}

impl Default for MockOrderSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOrderSource {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible output for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            next_number: AtomicU64::new(FIRST_ORDER_NUMBER),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reserve_numbers(&self, count: u64) -> u64 {
        self.next_number.fetch_add(count, Ordering::Relaxed)
    }
}

impl OrderSource for MockOrderSource {
    fn initial_orders(&self, count: usize) -> Result<Vec<Order>, DomainError> {
        let first = self.reserve_numbers(count as u64);
        let now = Utc::now();
        let mut rng = self.rng();

        (0..count)
            .map(|i| -> Result<Order, DomainError> {
                let days_back = rng.gen_range(0..HISTORY_DAYS);
                let order_date = now - Duration::days(days_back);
                let status = random_status(&mut rng);
                let mut order =
                    build_order(&mut rng, first + i as u64, order_date)?.with_status(status);
                if matches!(status, OrderStatus::Shipped | OrderStatus::Delivered) {
                    let tracking = format!("TRK{}", random_token(&mut rng, 8).to_uppercase());
                    order = order.with_tracking_number(tracking);
                }
                if rng.gen_bool(NOTE_PROBABILITY) {
                    order = order.with_notes(format!("Note for order {}", i + 1));
                }
                Ok(order)
            })
            .collect()
    }

    fn new_order(&self) -> Result<Order, DomainError> {
        let number = self.reserve_numbers(1);
        build_order(&mut self.rng(), number, Utc::now())
    }

    fn random_status(&self) -> OrderStatus {
        random_status(&mut self.rng())
    }
}

fn random_status(rng: &mut StdRng) -> OrderStatus {
    OrderStatus::ALL[rng.gen_range(0..OrderStatus::ALL.len())]
}

/// First `len` hex digits of a random UUID.
fn random_token(rng: &mut StdRng, len: usize) -> String {
    let mut token = Builder::from_random_bytes(rng.gen()).into_uuid().simple().to_string();
    token.truncate(len);
    token
}

fn build_order(
    rng: &mut StdRng,
    number: u64,
    order_date: DateTime<Utc>,
) -> Result<Order, DomainError> {
    let (id, name, email, phone) = CUSTOMERS[rng.gen_range(0..CUSTOMERS.len())];
    let customer = Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    };

    let (street, city, state, zip_code, country) = ADDRESSES[rng.gen_range(0..ADDRESSES.len())];
    let shipping_address = ShippingAddress {
        street: street.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        zip_code: zip_code.to_string(),
        country: country.to_string(),
    };

    let item_count = rng.gen_range(1..=MAX_ITEMS);
    let items = (0..item_count)
        .map(|_| {
            let (name, cents) = PRODUCTS[rng.gen_range(0..PRODUCTS.len())];
            OrderItem {
                id: format!("item-{}", random_token(rng, 9)),
                name: name.to_string(),
                quantity: rng.gen_range(1..=MAX_QUANTITY),
                price: BigDecimal::new(cents.into(), 2),
                image: PLACEHOLDER_IMAGE.to_string(),
            }
        })
        .collect();

    Order::new(
        format!("ORD-{}", number),
        customer,
        items,
        shipping_address,
        order_date,
    )
}
