//! Orders placed by users.
//!
//! An [`Order`] keeps its total in step with its items and refreshes its
//! update timestamp whenever the status changes. Callers pass timestamps in
//! explicitly (usually from a `mockable::Clock`).

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Errors raised by order state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStateError {
    NotCancellable { status: OrderStatus },
    /// An item total or the order total does not fit in a `Decimal`.
    AmountOverflow,
}

impl fmt::Display for OrderStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCancellable { status } => {
                write!(f, "order cannot be cancelled in status {status}")
            }
            Self::AmountOverflow => f.write_str("order amount exceeds the representable range"),
        }
    }
}

impl std::error::Error for OrderStateError {}

/// A product line within an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    product_name: String,
    unit_price: Decimal,
    quantity: u32,
}

impl OrderItem {
    /// Build a line item.
    pub fn new(product_name: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            product_name: product_name.into(),
            unit_price,
            quantity,
        }
    }

    pub fn product_name(&self) -> &str {
        self.product_name.as_str()
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    pub fn total_price(&self) -> Result<Decimal, OrderStateError> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(OrderStateError::AmountOverflow)
    }
}

/// An order placed by a user.
///
/// ## Invariants
/// - `total_amount` always equals the sum of the items' total prices.
/// - `updated_at` changes whenever the status does.
/// - Equality is by identifier.
#[derive(Debug, Clone)]
pub struct Order {
    id: Option<OrderId>,
    user_id: UserId,
    items: Vec<OrderItem>,
    total_amount: Decimal,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Start an empty, pending order.
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id,
            items: Vec::new(),
            total_amount: Decimal::ZERO,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    pub fn assign_id(&mut self, id: OrderId) {
        self.id = Some(id);
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Append an item and recompute the total.
    ///
    /// On [`OrderStateError::AmountOverflow`] the order is left unchanged.
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), OrderStateError> {
        let total = self
            .total_amount
            .checked_add(item.total_price()?)
            .ok_or(OrderStateError::AmountOverflow)?;
        self.items.push(item);
        self.total_amount = total;
        Ok(())
    }

    /// Remove the first item equal to `item`.
    ///
    /// Returns whether an item was removed. On
    /// [`OrderStateError::AmountOverflow`] the order is left unchanged.
    pub fn remove_item(&mut self, item: &OrderItem) -> Result<bool, OrderStateError> {
        let Some(position) = self.items.iter().position(|candidate| candidate == item) else {
            return Ok(false);
        };
        let mut remaining = self.items.clone();
        remaining.remove(position);
        self.set_items(remaining)?;
        Ok(true)
    }

    /// Replace all items and recompute the total.
    ///
    /// On [`OrderStateError::AmountOverflow`] the order is left unchanged.
    pub fn set_items(&mut self, items: Vec<OrderItem>) -> Result<(), OrderStateError> {
        let total = total_of(&items)?;
        self.items = items;
        self.total_amount = total;
        Ok(())
    }

    /// Whether the order has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Move to `status` and refresh the update timestamp.
    pub fn set_status(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    /// Only pending or confirmed orders may be cancelled.
    pub fn can_be_cancelled(&self) -> bool {
        matches!(self.status, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    /// Cancel the order, failing once it has shipped or already ended.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), OrderStateError> {
        if !self.can_be_cancelled() {
            return Err(OrderStateError::NotCancellable {
                status: self.status,
            });
        }
        self.set_status(OrderStatus::Cancelled, now);
        Ok(())
    }
}

fn total_of(items: &[OrderItem]) -> Result<Decimal, OrderStateError> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        total
            .checked_add(item.total_price()?)
            .ok_or(OrderStateError::AmountOverflow)
    })
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn placed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[fixture]
    fn order(placed_at: DateTime<Utc>) -> Order {
        Order::new(UserId::new(1), placed_at)
    }

    fn laptop() -> OrderItem {
        OrderItem::new("Laptop", Decimal::new(99_999, 2), 1)
    }

    fn mouse() -> OrderItem {
        OrderItem::new("Mouse", Decimal::new(2_550, 2), 2)
    }

    #[rstest]
    fn new_orders_start_pending_and_empty(order: Order, placed_at: DateTime<Utc>) {
        assert!(order.is_empty());
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.total_amount(), Decimal::ZERO);
        assert_eq!(order.item_count(), 0);
        assert_eq!(order.created_at(), placed_at);
        assert_eq!(order.updated_at(), placed_at);
        assert_eq!(order.user_id(), UserId::new(1));
    }

    #[rstest]
    fn totals_follow_item_changes(mut order: Order) {
        order.add_item(laptop()).expect("add laptop");
        order.add_item(mouse()).expect("add mouse");
        assert_eq!(order.total_amount(), Decimal::new(105_099, 2));
        assert_eq!(order.item_count(), 3);

        assert_eq!(order.remove_item(&mouse()), Ok(true));
        assert_eq!(order.total_amount(), Decimal::new(99_999, 2));
        assert_eq!(order.remove_item(&mouse()), Ok(false));

        order
            .set_items(vec![mouse(), mouse()])
            .expect("replace items");
        assert_eq!(order.total_amount(), Decimal::new(10_200, 2));
        assert_eq!(order.items().len(), 2);
    }

    #[rstest]
    fn item_total_overflow_is_an_error() {
        let yacht = OrderItem::new("Yacht", Decimal::MAX, 2);
        assert_eq!(yacht.total_price(), Err(OrderStateError::AmountOverflow));
    }

    #[rstest]
    fn overflowing_item_leaves_the_order_unchanged(mut order: Order) {
        order.add_item(laptop()).expect("add laptop");

        let result = order.add_item(OrderItem::new("Yacht", Decimal::MAX, 2));

        assert_eq!(result, Err(OrderStateError::AmountOverflow));
        assert_eq!(order.items(), [laptop()]);
        assert_eq!(order.total_amount(), Decimal::new(99_999, 2));
    }

    #[rstest]
    fn overflowing_order_total_leaves_the_order_unchanged(mut order: Order) {
        let fleet = OrderItem::new("Fleet", Decimal::MAX, 1);
        order.add_item(fleet.clone()).expect("single max item fits");

        assert_eq!(
            order.add_item(laptop()),
            Err(OrderStateError::AmountOverflow)
        );
        assert_eq!(
            order.set_items(vec![laptop(), fleet.clone(), fleet]),
            Err(OrderStateError::AmountOverflow)
        );
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.total_amount(), Decimal::MAX);
    }

    #[rstest]
    fn status_changes_refresh_updated_at(mut order: Order, placed_at: DateTime<Utc>) {
        let later = placed_at + TimeDelta::minutes(5);
        order.set_status(OrderStatus::Confirmed, later);
        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert_eq!(order.updated_at(), later);
        assert_eq!(order.created_at(), placed_at);
    }

    #[rstest]
    #[case(OrderStatus::Pending, true)]
    #[case(OrderStatus::Confirmed, true)]
    #[case(OrderStatus::Shipped, false)]
    #[case(OrderStatus::Delivered, false)]
    #[case(OrderStatus::Cancelled, false)]
    fn cancellation_depends_on_status(
        mut order: Order,
        placed_at: DateTime<Utc>,
        #[case] status: OrderStatus,
        #[case] cancellable: bool,
    ) {
        order.set_status(status, placed_at);
        assert_eq!(order.can_be_cancelled(), cancellable);

        let result = order.cancel(placed_at + TimeDelta::hours(1));
        if cancellable {
            assert_eq!(result, Ok(()));
            assert_eq!(order.status(), OrderStatus::Cancelled);
        } else {
            assert_eq!(result, Err(OrderStateError::NotCancellable { status }));
            assert_eq!(order.status(), status);
        }
    }

    #[rstest]
    fn equality_is_by_identifier(placed_at: DateTime<Utc>) {
        let mut first = Order::new(UserId::new(1), placed_at);
        let mut second = Order::new(UserId::new(2), placed_at);
        first.assign_id(OrderId::new(10));
        second.assign_id(OrderId::new(10));
        second.add_item(laptop()).expect("add laptop");
        assert_eq!(first, second);
        assert_eq!(first.id().map(OrderId::get), Some(10));
    }
}
