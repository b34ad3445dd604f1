//! Stock dashboard counters.

use higeia_api::{ApiClient, ApiResult};
use higeia_types::FetchParams;
use serde_json::Value;
use tracing::debug;

/// The counters the stock dashboard renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockDashboard {
    pub low_stock: i64,
    pub out_of_stock: i64,
    /// Low minus out: items running low that are still on the shelf.
    pub below_average: i64,
    pub high_stock: i64,
    pub total_items: i64,
}

/// Fetches the three stock counters in parallel and aggregates them.
///
/// `low-count` answers with a one-row array carrying `low_count` and
/// `out_count`; `high-count` and `count` answer with bare numbers. Any
/// shape outside that reads as zero rather than failing the dashboard.
pub async fn load_stock_dashboard(client: &ApiClient) -> ApiResult<StockDashboard> {
    let params = FetchParams::new();
    let (low, high, total) = tokio::try_join!(
        client.fetch_value("/pharmacy/stock/low-count", &params),
        client.fetch_value("/pharmacy/stock/high-count", &params),
        client.fetch_value("/pharmacy/stock/count", &params),
    )?;

    let low_row = match low {
        Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
        _ => Value::Null,
    };
    let low_stock = count_field(&low_row, "low_count");
    let out_of_stock = count_field(&low_row, "out_count");

    let dashboard = StockDashboard {
        low_stock,
        out_of_stock,
        below_average: low_stock - out_of_stock,
        high_stock: count_value(&high),
        total_items: count_value(&total),
    };
    debug!("stock dashboard loaded: {dashboard:?}");
    Ok(dashboard)
}

// The count endpoints answer in whatever shape the reporting layer felt
// like that day; numbers sometimes arrive as strings.
fn count_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().map_or(0, |f| f as i64),
        _ => 0,
    }
}

fn count_field(row: &Value, key: &str) -> i64 {
    row.get(key).map_or(0, count_value)
}
