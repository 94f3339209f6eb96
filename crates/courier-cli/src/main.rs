use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use courier_core::app::{RestaurantBuilder, RestaurantConfig};
use courier_core::domain::{OrderPaid, OrderPlaced, PaymentEvent};

/// courier: run one restaurant order through the typed bus
#[derive(Parser, Debug)]
#[command(name = "courier")]
#[command(about = "Places an order and lets the cashier settle it")]
struct Args {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Line item as name=quantity (repeatable)
    #[arg(short, long = "item", value_parser = parse_item)]
    items: Vec<(String, u32)>,
}

fn parse_item(raw: &str) -> Result<(String, u32), String> {
    let (name, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=quantity, got {raw:?}"))?;
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|e| format!("bad quantity in {raw:?}: {e}"))?;
    Ok((name.trim().to_string(), quantity))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // (A) 設定とログ
    let config = match &args.config {
        Some(path) => RestaurantConfig::load(path)?,
        None => RestaurantConfig::default(),
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // (B) bus と Handler を組み立て（購読者がいなければここで失敗する）
    let restaurant = RestaurantBuilder::new(config)
        .expect::<OrderPlaced>()
        .expect::<PaymentEvent>()
        .expect::<OrderPaid>()
        .build()
        .await?;

    // (C) 注文（品名が重複したら後勝ち）
    let items: BTreeMap<String, u32> = if args.items.is_empty() {
        BTreeMap::from([("burger".to_string(), 2), ("fries".to_string(), 1)])
    } else {
        args.items.into_iter().collect()
    };
    let order_id = restaurant.waiter.place_new_order(&items).await?;
    info!(%order_id, "order settled");

    // (D) 支払い済みの控えを出力
    for order in restaurant.receipts.orders().await {
        println!("{}", serde_json::to_string_pretty(&order)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_item_accepts_name_and_quantity() {
        assert_eq!(parse_item("burger=2"), Ok(("burger".to_string(), 2)));
        assert_eq!(parse_item(" fries = 1 "), Ok(("fries".to_string(), 1)));
    }

    #[test]
    fn parse_item_rejects_malformed_input() {
        assert!(parse_item("burger").is_err());
        assert!(parse_item("burger=two").is_err());
    }

    #[test]
    fn args_collect_repeated_items() {
        let args = Args::parse_from(["courier", "--item", "tea=1", "-i", "cake=2"]);
        assert_eq!(
            args.items,
            vec![("tea".to_string(), 1), ("cake".to_string(), 2)]
        );
        assert!(args.config.is_none());
    }
}
