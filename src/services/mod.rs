//! External collaborators: bar retrieval and alert delivery.

pub mod delivery;
pub mod market_data;
pub mod telegram;
pub mod yahoo;

pub use delivery::{AlertSink, DeliveryError, LogSink};
pub use market_data::{BarQuery, InMemoryBarProvider, MarketDataProvider, ProviderError};
pub use telegram::TelegramNotifier;
pub use yahoo::YahooChartProvider;
