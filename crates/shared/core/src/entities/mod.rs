mod ids;
mod market_data;
mod security;
mod side;

pub use ids::TransactionIdGenerator;
pub use market_data::{
    DepthSnapshot, MarketData, OrderLogAction, OrderLogItem, QuoteLevel, TradeTick,
};
pub use security::{DataType, SecurityId};
pub use side::Side;
