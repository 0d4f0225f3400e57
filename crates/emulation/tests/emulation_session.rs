//! Emulation session integration tests
//!
//! End-to-end runs: generators registered through the connector, simulated
//! time advanced by the caller, data observed on the market data feed.

use chrono::{DateTime, Duration, Utc};
use hermes_clock::{MarketTimer, SystemClock};
use hermes_core::{
    DataType, MarketData, MarketDataGenerator, MarketDepthGenerator, MarketDepthGeneratorParams, OrderLogGenerator,
    OrderLogGeneratorParams, SecurityId, TradeGenerator, TradeGeneratorParams,
    TransactionIdGenerator,
};
use hermes_emulation::{
    EmulationConfig, EmulationConnector, EmulationMessageAdapter, EmulatorSettings, MarketEmulator,
};
use hermes_gateway::{
    ChannelSubscriber, Message, MessageSender, OutMessage, Subjects, Subscriber,
    SubscriptionResponse, inbound_channel,
};
use std::sync::Arc;

fn start() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn connector() -> EmulationConnector {
    let _ = env_logger::try_init();
    EmulationConnector::new(EmulationConfig::default()).unwrap()
}

fn seeded_trades(security: &str, interval_ms: u64, seed: u64) -> Arc<TradeGenerator> {
    Arc::new(TradeGenerator::new(
        security,
        TradeGeneratorParams {
            interval_ms,
            seed: Some(seed),
            ..Default::default()
        },
    ))
}

fn collect(feed: &mut ChannelSubscriber<OutMessage>) -> (Vec<SubscriptionResponse>, Vec<MarketData>) {
    let mut responses = Vec::new();
    let mut data = Vec::new();
    while let Some(msg) = feed.try_next().unwrap() {
        match msg {
            OutMessage::SubscriptionResponse(r) => responses.push(r),
            OutMessage::MarketData(d) => data.push(d),
        }
    }
    (responses, data)
}

// ============================================================================
// Emission
// ============================================================================

#[tokio::test]
async fn test_all_generator_kinds_emit() {
    let mut connector = connector();
    let mut feed = connector.market_data();

    connector
        .register_trades(seeded_trades("BTC-USD", 1000, 1))
        .unwrap();
    connector
        .register_market_depth(Arc::new(MarketDepthGenerator::new(
            "BTC-USD",
            MarketDepthGeneratorParams {
                interval_ms: 1000,
                seed: Some(2),
                ..Default::default()
            },
        )))
        .unwrap();
    connector
        .register_order_log(Arc::new(OrderLogGenerator::new(
            "ETH-USD",
            OrderLogGeneratorParams {
                interval_ms: 500,
                seed: Some(3),
                ..Default::default()
            },
        )))
        .unwrap();

    connector.advance_time(start() + Duration::seconds(10)).unwrap();
    assert_eq!(connector.pump().await.unwrap(), 4);

    let (responses, data) = collect(&mut feed);
    assert_eq!(responses.len(), 3);
    assert!(responses.iter().all(|r| r.is_ok() && r.is_subscribe));

    let count = |kind: DataType| data.iter().filter(|d| d.data_type() == kind).count();
    assert_eq!(count(DataType::Ticks), 10);
    assert_eq!(count(DataType::MarketDepth), 10);
    assert_eq!(count(DataType::OrderLog), 20);

    // Merged feed is ordered by simulated time
    assert!(data.windows(2).all(|w| w[0].time() <= w[1].time()));

    let emulator = connector.emulator().unwrap();
    let btc = SecurityId::new("BTC-USD");
    assert!(emulator.last_price(&btc).is_some());
    assert!(emulator.best_bid(&btc).is_some());
    assert!(emulator.best_bid(&btc) < emulator.best_ask(&btc));
    assert_eq!(connector.current_time().unwrap(), start() + Duration::seconds(10));
}

#[tokio::test]
async fn test_unregister_stops_emission() {
    let mut connector = connector();
    let mut feed = connector.market_data();
    let generator = seeded_trades("BTC-USD", 1000, 1);

    connector.register_trades(generator.clone()).unwrap();
    connector.advance_time(start() + Duration::seconds(3)).unwrap();
    connector.unregister_trades(generator.clone()).unwrap();
    connector.advance_time(start() + Duration::seconds(6)).unwrap();
    connector.pump().await.unwrap();

    let (responses, data) = collect(&mut feed);
    assert_eq!(responses.len(), 2);
    assert!(!responses[1].is_subscribe);
    assert_eq!(data.len(), 3);
    assert!(data.iter().all(|d| d.time() <= start() + Duration::seconds(3)));
}

#[tokio::test]
async fn test_backend_refuses_duplicates() {
    let mut connector = connector();
    let mut feed = connector.market_data();
    let generator = seeded_trades("BTC-USD", 1000, 1);

    // Router accepts everything
    connector.register_trades(generator.clone()).unwrap();
    connector.register_trades(generator.clone()).unwrap();
    connector.unregister_trades(generator.clone()).unwrap();
    connector.unregister_trades(generator.clone()).unwrap();
    assert_eq!(connector.pump().await.unwrap(), 4);

    let (responses, _) = collect(&mut feed);
    let outcomes: Vec<_> = responses.iter().map(|r| r.is_ok()).collect();
    assert_eq!(outcomes, vec![true, false, true, false]);
    assert!(!connector.adapter().is_registered(generator.id()));
}

#[tokio::test]
async fn test_oversized_interval_is_refused_not_fatal() {
    let mut connector = connector();
    let mut feed = connector.market_data();
    let oversized = seeded_trades("BTC-USD", u64::MAX, 1);
    let regular = seeded_trades("ETH-USD", 1000, 2);

    connector.register_trades(oversized.clone()).unwrap();
    connector.register_trades(regular).unwrap();
    connector.advance_time(start() + Duration::seconds(3)).unwrap();
    assert_eq!(connector.pump().await.unwrap(), 3);

    let (responses, data) = collect(&mut feed);
    let outcomes: Vec<_> = responses.iter().map(|r| r.is_ok()).collect();
    assert_eq!(outcomes, vec![false, true]);
    assert_eq!(data.len(), 3);
    assert!(!connector.adapter().is_registered(oversized.id()));
}

#[tokio::test]
async fn test_seeded_sessions_are_reproducible() {
    async fn run() -> Vec<MarketData> {
        let mut connector = connector();
        let mut feed = connector.market_data();
        connector
            .register_trades(seeded_trades("BTC-USD", 250, 42))
            .unwrap();
        connector
            .register_order_log(Arc::new(OrderLogGenerator::new(
                "BTC-USD",
                OrderLogGeneratorParams {
                    interval_ms: 400,
                    seed: Some(43),
                    ..Default::default()
                },
            )))
            .unwrap();
        connector.advance_time(start() + Duration::seconds(5)).unwrap();
        connector.pump().await.unwrap();
        collect(&mut feed).1
    }

    let first = run().await;
    let second = run().await;
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_time_never_moves_backwards() {
    let mut connector = connector();
    let mut feed = connector.market_data();
    connector
        .register_trades(seeded_trades("BTC-USD", 1000, 1))
        .unwrap();

    connector.advance_time(start() + Duration::seconds(5)).unwrap();
    connector.advance_time(start() + Duration::seconds(2)).unwrap();
    connector.pump().await.unwrap();

    let (_, data) = collect(&mut feed);
    assert_eq!(data.len(), 5);
    assert_eq!(connector.current_time().unwrap(), start() + Duration::seconds(5));
}

#[tokio::test]
async fn test_depth_truncated_by_settings() {
    let mut connector = EmulationConnector::new(
        EmulationConfig::from_json(r#"{"settings": {"max_depth": 3}}"#).unwrap(),
    )
    .unwrap();
    let mut feed = connector.market_data();

    connector
        .register_market_depth(Arc::new(MarketDepthGenerator::new(
            "ETH-USD",
            MarketDepthGeneratorParams {
                max_bids_depth: 10,
                max_asks_depth: 10,
                seed: Some(5),
                ..Default::default()
            },
        )))
        .unwrap();
    connector.advance_time(start() + Duration::seconds(60)).unwrap();
    connector.pump().await.unwrap();

    let (_, data) = collect(&mut feed);
    assert!(!data.is_empty());
    for item in data {
        let MarketData::Depth(depth) = item else {
            panic!("expected depth");
        };
        assert!(depth.bids.len() <= 3 && depth.asks.len() <= 3);
    }
}

#[tokio::test]
async fn test_feed_filtered_by_subject() {
    let mut connector = connector();
    let mut btc = connector.market_data_on(Subjects::market_data_for("BTC-USD"));
    let mut responses = connector.market_data_on(Subjects::SUBSCRIPTIONS);

    connector
        .register_trades(seeded_trades("BTC-USD", 1000, 1))
        .unwrap();
    connector
        .register_trades(seeded_trades("ETH-USD", 1000, 2))
        .unwrap();
    connector.advance_time(start() + Duration::seconds(2)).unwrap();
    connector.pump().await.unwrap();

    let (acks, btc_data) = collect(&mut btc);
    assert!(acks.is_empty());
    assert_eq!(btc_data.len(), 2);
    assert!(
        btc_data
            .iter()
            .all(|d| d.security_id() == &SecurityId::new("BTC-USD"))
    );

    let (acks, data) = collect(&mut responses);
    assert_eq!(acks.len(), 2);
    assert!(data.is_empty());
}

// ============================================================================
// Market time
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_emulation_timer_emits_nothing() {
    let mut connector = connector();
    let mut feed = connector.market_data();
    connector
        .register_trades(seeded_trades("BTC-USD", 100, 1))
        .unwrap();

    connector.start_market_timer().unwrap();
    tokio::time::sleep(std::time::Duration::from_secs(30)).await;

    // Only the registration was queued; no time message, no data
    assert_eq!(connector.pump().await.unwrap(), 1);
    let (responses, data) = collect(&mut feed);
    assert_eq!(responses.len(), 1);
    assert!(data.is_empty());

    connector.stop_market_timer();
}

#[tokio::test(start_paused = true)]
async fn test_live_timer_would_emit_time() {
    let emulator = Arc::new(MarketEmulator::new(EmulatorSettings::default(), start()));
    let adapter = EmulationMessageAdapter::with_emulator(
        Arc::new(TransactionIdGenerator::default()),
        emulator,
    );
    let (sender, inbound) = inbound_channel(None);
    let tick_sender = sender.clone();
    let timer = MarketTimer::new(
        std::time::Duration::from_millis(100),
        Arc::new(SystemClock::new()),
        move |now| {
            let _ = tick_sender.send(Message::Time(now));
        },
    );
    let mut connector = EmulationConnector::with_parts(
        "live",
        adapter,
        Arc::new(sender),
        Some(inbound),
        Box::new(timer),
        64,
    );

    connector.start_market_timer().unwrap();
    assert!(connector.is_market_timer_running());
    tokio::time::sleep(std::time::Duration::from_millis(350)).await;
    connector.stop_market_timer();

    assert!(connector.pump().await.unwrap() >= 3);
    assert!(connector.current_time().unwrap() > start());
}
