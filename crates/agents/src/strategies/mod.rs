//! Trading strategies.
//!
//! Each strategy owns its private state and RNG; the account it trades
//! against is owned by the simulation and borrowed per decision. The
//! closed [`Strategy`] enum replaces dynamic dispatch: the set of
//! trader kinds is fixed.

mod mean_reverting;
mod random_trader;
mod trend_follower;

pub use mean_reverting::{MeanRevertingConfig, MeanRevertingTrader};
pub use random_trader::{RandomTrader, RandomTraderConfig};
pub use trend_follower::{TrendFollower, TrendFollowerConfig};

use crate::account::Account;
use crate::context::MarketView;
use types::{Order, OrderSide, Price, Quantity, TraderId, TraderKind};

/// One trader's decision model.
#[derive(Debug, Clone)]
pub enum Strategy {
    Random(RandomTrader),
    MeanReverting(MeanRevertingTrader),
    TrendFollowing(TrendFollower),
}

impl Strategy {
    pub fn kind(&self) -> TraderKind {
        match self {
            Strategy::Random(_) => TraderKind::Random,
            Strategy::MeanReverting(_) => TraderKind::MeanReverting,
            Strategy::TrendFollowing(_) => TraderKind::TrendFollowing,
        }
    }

    /// Ask the strategy for at most one order this step. Returns `None`
    /// when the trader abstains or cannot cover the order.
    pub fn decide(
        &mut self,
        id: TraderId,
        account: &Account,
        view: &MarketView,
    ) -> Option<Order> {
        match self {
            Strategy::Random(t) => t.decide(id, account, view),
            Strategy::MeanReverting(t) => t.decide(id, account, view),
            Strategy::TrendFollowing(t) => t.decide(id, account, view),
        }
    }
}

/// Resource check against the current market price: buys need the cash,
/// sells need the inventory.
pub(crate) fn can_cover(
    account: &Account,
    side: OrderSide,
    price: Price,
    quantity: Quantity,
) -> bool {
    match side {
        OrderSide::Buy => account.cash >= price * quantity,
        OrderSide::Sell => account.shares >= quantity.raw() as i64,
    }
}

/// Trader-generated limit prices are rounded to cents and floored at
/// one tick ($0.01).
pub(crate) fn clamp_limit_price(price: f64) -> Price {
    Price::from_float_cents(price).max(Price::TICK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Cash;

    #[test]
    fn can_cover_checks_each_side() {
        let account = Account::new(Cash::from_float(1_000.0), 5, Price::from_float(100.0));
        let price = Price::from_float(100.0);

        assert!(can_cover(&account, OrderSide::Buy, price, Quantity(10)));
        assert!(!can_cover(&account, OrderSide::Buy, price, Quantity(11)));
        assert!(can_cover(&account, OrderSide::Sell, price, Quantity(5)));
        assert!(!can_cover(&account, OrderSide::Sell, price, Quantity(6)));
    }

    #[test]
    fn limit_prices_floor_at_one_tick() {
        assert_eq!(clamp_limit_price(0.004), Price::TICK);
        assert_eq!(clamp_limit_price(-3.0), Price::TICK);
        assert_eq!(clamp_limit_price(99.996), Price::from_float(100.0));
    }
}
