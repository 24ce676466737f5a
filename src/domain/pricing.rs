use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::format::{format_currency, format_duration};

/// Anything that contributes a price (in cents) and a duration to a booking.
pub trait Priced {
    fn price(&self) -> i64;
    fn duration_minutes(&self) -> i32;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookingTotals {
    pub price: i64,
    pub duration_minutes: i32,
}

impl BookingTotals {
    /// Summary line for the booking screen, e.g. `R$ 60,00 · 50 min`.
    pub fn label(&self) -> String {
        format!(
            "{} · {}",
            format_currency(self.price),
            format_duration(self.duration_minutes)
        )
    }
}

/// Sums price and duration, or `None` if either overflows.
pub fn checked_totals<'a, T, I>(items: I) -> Option<BookingTotals>
where
    T: Priced + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .try_fold(BookingTotals::default(), |acc, item| {
            Some(BookingTotals {
                price: acc.price.checked_add(item.price())?,
                duration_minutes: acc.duration_minutes.checked_add(item.duration_minutes())?,
            })
        })
}

/// Running totals for display; saturates instead of overflowing.
pub fn totals<'a, T, I>(items: I) -> BookingTotals
where
    T: Priced + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .fold(BookingTotals::default(), |acc, item| BookingTotals {
            price: acc.price.saturating_add(item.price()),
            duration_minutes: acc.duration_minutes.saturating_add(item.duration_minutes()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(i64, i32);

    impl Priced for Item {
        fn price(&self) -> i64 {
            self.0
        }
        fn duration_minutes(&self) -> i32 {
            self.1
        }
    }

    #[test]
    fn sums_price_and_duration() {
        let items = [Item(3500, 30), Item(2500, 20), Item(5000, 45)];
        assert_eq!(
            totals(&items),
            BookingTotals {
                price: 11000,
                duration_minutes: 95
            }
        );
    }

    #[test]
    fn label_formats_price_and_duration() {
        let totals = BookingTotals {
            price: 6000,
            duration_minutes: 95,
        };
        assert_eq!(totals.label(), "R$ 60,00 · 1 h 35 min");
    }

    #[test]
    fn overflowing_sums_are_caught() {
        let items = [Item(100, i32::MAX), Item(100, 1)];
        assert_eq!(checked_totals(&items), None);
        assert_eq!(totals(&items).duration_minutes, i32::MAX);

        let items = [Item(i64::MAX, 30), Item(1, 30)];
        assert_eq!(checked_totals(&items), None);

        let items = [Item(3500, 30), Item(2500, 20)];
        assert_eq!(checked_totals(&items), Some(totals(&items)));
    }

    #[test]
    fn empty_selection_is_zero() {
        let items: [Item; 0] = [];
        assert_eq!(totals(&items), BookingTotals::default());
    }
}
