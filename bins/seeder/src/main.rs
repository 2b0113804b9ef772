//! Seeds demonstration blocks, orders, and ledger rows into the hosted
//! store for local development.

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tourdesk_core::availability::{Block, BlockRule, DayPattern, Weekday};
use tourdesk_core::payments::{EntryKind, LedgerEntry, Order};
use tourdesk_shared::AppConfig;
use tourdesk_shared::types::{BlockId, LedgerEntryId, OrderId, ProviderId, TourId};
use tourdesk_store::StoreClient;

fn demo_blocks(tour_id: TourId, provider_id: ProviderId) -> Vec<Block> {
    let base = Block {
        id: BlockId::new(),
        tour_id,
        provider_id: None,
        program: None,
        rule: BlockRule::Always {
            pattern: DayPattern::Unrestricted,
        },
        reason: String::new(),
        notes: None,
        auto_unblock: false,
        is_active: true,
    };

    vec![
        Block {
            id: BlockId::new(),
            rule: BlockRule::OneDay {
                date: NaiveDate::from_ymd_opt(2025, 8, 17).expect("valid date"),
            },
            reason: "boat maintenance".to_string(),
            provider_id: Some(provider_id),
            ..base.clone()
        },
        Block {
            id: BlockId::new(),
            rule: BlockRule::DateRange {
                start: NaiveDate::from_ymd_opt(2025, 11, 1).expect("valid date"),
                end: NaiveDate::from_ymd_opt(2026, 2, 28).expect("valid date"),
                pattern: DayPattern::Unrestricted,
            },
            reason: "low season".to_string(),
            ..base.clone()
        },
        Block {
            id: BlockId::new(),
            rule: BlockRule::Recurring {
                pattern: DayPattern::Weekdays([Weekday::Su].into()),
            },
            reason: "no sunday departures".to_string(),
            ..base
        },
    ]
}

fn demo_order() -> Order {
    Order {
        id: OrderId::new(),
        order_number: "ORD-1001".to_string(),
        customer_name: "Jamie Rivera".to_string(),
        tour_id: None,
        travel_date: NaiveDate::from_ymd_opt(2025, 9, 12),
        total_amount: dec!(1000),
        created_at: Utc::now(),
    }
}

fn demo_entries(order_number: &str) -> Vec<LedgerEntry> {
    vec![
        LedgerEntry {
            id: LedgerEntryId::new(),
            order_number: order_number.to_string(),
            kind: EntryKind::Payment,
            amount: dec!(400),
            method: Some("card".to_string()),
            reference: Some("rcpt-8841".to_string()),
            notes: None,
            recorded_by: Some("ana".to_string()),
            created_at: Utc::now(),
        },
        LedgerEntry {
            id: LedgerEntryId::new(),
            order_number: order_number.to_string(),
            kind: EntryKind::Discount,
            amount: dec!(100),
            method: None,
            reference: None,
            notes: Some("returning customer".to_string()),
            recorded_by: Some("ana".to_string()),
            created_at: Utc::now(),
        },
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tourdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().expect("Failed to load configuration");
    let store = StoreClient::new(&config.store)?;

    let tour_id = TourId::new();
    let provider_id = ProviderId::new();

    for block in demo_blocks(tour_id, provider_id) {
        store.insert_block(&block).await?;
        info!(block_id = %block.id, reason = %block.reason, "Seeded block");
    }

    let order = demo_order();
    store.insert_order(&order).await?;
    info!(order_number = %order.order_number, "Seeded order");

    for entry in demo_entries(&order.order_number) {
        store.insert_ledger_entry(&entry).await?;
        info!(entry_id = %entry.id, kind = %entry.kind, "Seeded ledger entry");
    }

    info!("Seeding complete");
    Ok(())
}
