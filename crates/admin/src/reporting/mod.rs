//! Order-reporting aggregator.
//!
//! Pure functions over order snapshots. Everything here is total over
//! dirty data: missing totals count as zero, undated orders fall out of
//! date-scoped figures, and nothing panics on malformed input. Handlers
//! pass "now" and "today" in explicitly so the math stays clock-free and
//! testable.

use chrono::{DateTime, Datelike, Utc, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use kola_core::Order;

/// The seven weekdays in chart order, Monday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Revenue accumulated per weekday, Monday through Sunday.
///
/// Always holds exactly seven buckets, all present even when zero, in
/// fixed Mon..Sun order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeekdaySales {
    totals: [Decimal; 7],
}

impl WeekdaySales {
    /// The accumulated total for one weekday.
    #[must_use]
    pub fn total(&self, day: Weekday) -> Decimal {
        self.totals[day.num_days_from_monday() as usize]
    }

    /// Add an amount to a weekday's bucket.
    pub fn add(&mut self, day: Weekday, amount: Decimal) {
        self.totals[day.num_days_from_monday() as usize] += amount;
    }

    /// Buckets in Mon..Sun order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Decimal)> + '_ {
        WEEK.iter().map(|&day| (day, self.total(day)))
    }
}

/// A rotated weekday series ready for the dashboard chart.
///
/// `labels` and `values` are parallel, always length seven, with the
/// anchor day last.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

/// Sum of `totalPrice` across all orders, missing totals as zero.
#[must_use]
pub fn total_revenue(orders: &[Order]) -> Decimal {
    orders.iter().map(Order::total_or_zero).sum()
}

/// Revenue from orders placed in the same calendar month and year as
/// `reference`. Undated orders are excluded.
#[must_use]
pub fn revenue_in_month(orders: &[Order], reference: DateTime<Utc>) -> Decimal {
    orders
        .iter()
        .filter(|o| {
            o.created_at
                .is_some_and(|at| at.month() == reference.month() && at.year() == reference.year())
        })
        .map(Order::total_or_zero)
        .sum()
}

/// Units sold across orders placed in the same calendar year as
/// `reference`. Missing quantities count as zero; undated orders are
/// excluded.
#[must_use]
pub fn quantity_sold_in_year(orders: &[Order], reference: DateTime<Utc>) -> u64 {
    orders
        .iter()
        .filter(|o| o.created_at.is_some_and(|at| at.year() == reference.year()))
        .map(Order::quantity)
        .sum()
}

/// Bucket revenue by the weekday each order was placed.
///
/// All seven buckets are present even with no orders; undated orders are
/// skipped rather than guessed at.
#[must_use]
pub fn sales_by_weekday(orders: &[Order]) -> WeekdaySales {
    let mut sales = WeekdaySales::default();
    for order in orders {
        if let Some(at) = order.created_at {
            sales.add(at.weekday(), order.total_or_zero());
        }
    }
    sales
}

/// Rotate the weekday buckets so `today` lands last.
///
/// The series starts the day after `today` and walks the week in order,
/// which puts the anchor at the end: `rotate_to_end(s, Wed)` yields
/// Thu, Fri, Sat, Sun, Mon, Tue, Wed.
#[must_use]
pub fn rotate_to_end(sales: &WeekdaySales, today: Weekday) -> ChartSeries {
    let mut labels = Vec::with_capacity(WEEK.len());
    let mut values = Vec::with_capacity(WEEK.len());

    let mut day = today.succ();
    for _ in 0..WEEK.len() {
        labels.push(day.to_string());
        values.push(sales.total(day));
        day = day.succ();
    }

    ChartSeries { labels, values }
}

/// Sort orders newest-first in place.
///
/// The sort is stable; orders without a usable date are pinned to the
/// epoch and therefore end up last.
pub fn sort_by_date_desc(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at_or_epoch().cmp(&a.created_at_or_epoch()));
}

/// Format a money amount for display, rounded to 2 decimal places with
/// halves rounding away from zero.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kola_core::{OrderItem, OrderStatus, ProductId, UserId};

    fn d(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    fn order(total: Option<Decimal>, at: Option<DateTime<Utc>>) -> Order {
        Order {
            id: None,
            user_id: UserId::new("u-1"),
            items: Vec::new(),
            total_price: total,
            reference: String::new(),
            status: OrderStatus::Completed,
            created_at: at,
            shipping_address: None,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).single().expect("valid date")
    }

    #[test]
    fn test_total_revenue_empty_is_zero() {
        assert_eq!(total_revenue(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_total_revenue_treats_missing_totals_as_zero() {
        let orders = vec![
            order(Some(d("120.50")), Some(at(2024, 3, 4))),
            order(None, Some(at(2024, 3, 5))),
            order(Some(d("29.50")), None),
        ];
        assert_eq!(total_revenue(&orders), d("150.00"));
    }

    #[test]
    fn test_total_revenue_is_additive_over_slices() {
        let march = vec![
            order(Some(d("120.50")), Some(at(2024, 3, 4))),
            order(None, Some(at(2024, 3, 5))),
        ];
        let april = vec![
            order(Some(d("29.50")), Some(at(2024, 4, 1))),
            order(Some(d("0.99")), None),
        ];

        let mut combined = march.clone();
        combined.extend(april.clone());

        assert_eq!(
            total_revenue(&combined),
            total_revenue(&march) + total_revenue(&april)
        );
    }

    #[test]
    fn test_revenue_in_month_requires_month_and_year() {
        let orders = vec![
            order(Some(d("100")), Some(at(2024, 3, 4))),
            // Same month, different year: excluded
            order(Some(d("40")), Some(at(2023, 3, 4))),
            // Different month: excluded
            order(Some(d("7")), Some(at(2024, 2, 4))),
            // Undated: excluded, not a crash
            order(Some(d("9")), None),
        ];
        assert_eq!(revenue_in_month(&orders, at(2024, 3, 20)), d("100"));
    }

    #[test]
    fn test_quantity_sold_in_year() {
        let mut in_year = order(None, Some(at(2024, 1, 10)));
        in_year.items = vec![
            OrderItem {
                product_id: ProductId::new("p-1"),
                title: None,
                quantity: Some(2),
                price: None,
            },
            OrderItem {
                product_id: ProductId::new("p-2"),
                title: None,
                quantity: None, // missing quantity counts as zero
                price: None,
            },
            OrderItem {
                product_id: ProductId::new("p-3"),
                title: None,
                quantity: Some(3),
                price: None,
            },
        ];
        let mut out_of_year = order(None, Some(at(2023, 12, 31)));
        out_of_year.items = vec![OrderItem {
            product_id: ProductId::new("p-4"),
            title: None,
            quantity: Some(99),
            price: None,
        }];

        let orders = vec![in_year, out_of_year, order(None, None)];
        assert_eq!(quantity_sold_in_year(&orders, at(2024, 6, 1)), 5);
    }

    #[test]
    fn test_sales_by_weekday_has_all_seven_buckets() {
        let sales = sales_by_weekday(&[]);
        let buckets: Vec<(Weekday, Decimal)> = sales.iter().collect();
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].0, Weekday::Mon);
        assert_eq!(buckets[6].0, Weekday::Sun);
        assert!(buckets.iter().all(|(_, v)| *v == Decimal::ZERO));
    }

    #[test]
    fn test_sales_by_weekday_accumulates() {
        // 2024-03-04 is a Monday
        let orders = vec![
            order(Some(d("10")), Some(at(2024, 3, 4))),
            order(Some(d("15")), Some(at(2024, 3, 11))), // another Monday
            order(Some(d("3")), Some(at(2024, 3, 6))),   // Wednesday
            order(Some(d("99")), None),                  // undated: skipped
        ];
        let sales = sales_by_weekday(&orders);
        assert_eq!(sales.total(Weekday::Mon), d("25"));
        assert_eq!(sales.total(Weekday::Wed), d("3"));
        assert_eq!(sales.total(Weekday::Fri), Decimal::ZERO);
    }

    #[test]
    fn test_rotate_to_end_puts_anchor_last() {
        let mut sales = WeekdaySales::default();
        sales.add(Weekday::Wed, d("7"));
        sales.add(Weekday::Thu, d("1"));

        let series = rotate_to_end(&sales, Weekday::Wed);
        assert_eq!(
            series.labels,
            ["Thu", "Fri", "Sat", "Sun", "Mon", "Tue", "Wed"]
        );
        assert_eq!(series.values[0], d("1"));
        assert_eq!(series.values[6], d("7"));
    }

    #[test]
    fn test_rotate_to_end_sunday_anchor_is_calendar_order() {
        let series = rotate_to_end(&WeekdaySales::default(), Weekday::Sun);
        assert_eq!(
            series.labels,
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
    }

    #[test]
    fn test_sort_by_date_desc_pins_undated_last() {
        let mut orders = vec![
            order(Some(d("1")), Some(at(2024, 3, 4))),
            order(Some(d("2")), None),
            order(Some(d("3")), Some(at(2024, 3, 9))),
        ];
        sort_by_date_desc(&mut orders);
        let totals: Vec<Option<Decimal>> = orders.iter().map(|o| o.total_price).collect();
        assert_eq!(totals, [Some(d("3")), Some(d("1")), Some(d("2"))]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let day = at(2024, 3, 4);
        let mut orders = vec![
            order(Some(d("1")), Some(day)),
            order(Some(d("2")), Some(day)),
            order(Some(d("3")), Some(day)),
        ];
        sort_by_date_desc(&mut orders);
        let totals: Vec<Option<Decimal>> = orders.iter().map(|o| o.total_price).collect();
        assert_eq!(totals, [Some(d("1")), Some(d("2")), Some(d("3"))]);
    }

    #[test]
    fn test_format_amount_rounds_to_two_places() {
        assert_eq!(format_amount(d("1234.5")), "1234.50");
        assert_eq!(format_amount(d("0.005")), "0.01");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }
}
