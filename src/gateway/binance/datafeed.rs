//! Binance implementation of the market datafeed.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::constants::{KLINES_PATH, KLINE_ROW_MIN_FIELDS, MAX_KLINE_LIMIT, TICKER_PRICE_PATH};
use super::rest_client::BinanceRestClient;
use crate::config::DashboardConfig;
use crate::error::FetchError;
use crate::market::{Candle, KlineSeries, MarketDataFeed, TimeFrame};

/// Response of the ticker price endpoint
#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

/// Spot market data for a single trading pair
pub struct BinanceDatafeed {
    rest_client: BinanceRestClient,
    symbol: String,
}

impl BinanceDatafeed {
    pub fn new(rest_client: BinanceRestClient, symbol: impl Into<String>) -> Self {
        Self {
            rest_client,
            symbol: symbol.into().to_uppercase(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, FetchError> {
        let rest_client = BinanceRestClient::new(config)?;
        Ok(Self::new(rest_client, config.symbol.clone()))
    }
}

#[async_trait]
impl MarketDataFeed for BinanceDatafeed {
    async fn fetch_candles(
        &self,
        time_frame: TimeFrame,
        limit: u32,
    ) -> Result<KlineSeries, FetchError> {
        if limit == 0 || limit > MAX_KLINE_LIMIT {
            return Err(FetchError::InvalidLimit(limit));
        }

        let params = [
            ("symbol", self.symbol.clone()),
            ("interval", time_frame.value().to_string()),
            ("limit", limit.to_string()),
        ];
        let rows: Vec<Vec<Value>> = self.rest_client.get_json(KLINES_PATH, &params).await?;
        let series = parse_klines(&rows)?;

        debug!("Fetched {} {} klines for {}", series.len(), time_frame, self.symbol);
        Ok(series)
    }

    async fn fetch_current_price(&self) -> Result<f64, FetchError> {
        let params = [("symbol", self.symbol.clone())];
        let ticker: TickerPrice = self.rest_client.get_json(TICKER_PRICE_PATH, &params).await?;
        parse_price(&ticker.price)
    }
}

/// Normalize kline rows `[openTime, open, high, low, close, volume, ...]`
/// into parallel candle and volume arrays.
pub fn parse_klines(rows: &[Vec<Value>]) -> Result<KlineSeries, FetchError> {
    let mut series = KlineSeries::with_capacity(rows.len());
    let mut last_time: Option<i64> = None;

    for (index, row) in rows.iter().enumerate() {
        if row.len() < KLINE_ROW_MIN_FIELDS {
            return Err(FetchError::MalformedRow {
                index,
                reason: format!(
                    "expected at least {} fields, got {}",
                    KLINE_ROW_MIN_FIELDS,
                    row.len()
                ),
            });
        }

        let open_time_ms = row[0].as_i64().ok_or_else(|| FetchError::MalformedRow {
            index,
            reason: format!("open time is not an integer: {}", row[0]),
        })?;
        let time = open_time_ms / 1000;

        if last_time.is_some_and(|prev| time <= prev) {
            return Err(FetchError::NonMonotonic { index });
        }
        last_time = Some(time);

        let candle = Candle {
            time,
            open: field_f64(row, 1, index)?,
            high: field_f64(row, 2, index)?,
            low: field_f64(row, 3, index)?,
            close: field_f64(row, 4, index)?,
        };
        series.push(candle, field_f64(row, 5, index)?);
    }

    Ok(series)
}

/// Parse a ticker price body such as `{"symbol":"BTCUSDT","price":"43000.10"}`
pub fn parse_ticker_price(body: &str) -> Result<f64, FetchError> {
    let ticker: TickerPrice = serde_json::from_str(body)?;
    parse_price(&ticker.price)
}

fn parse_price(price: &str) -> Result<f64, FetchError> {
    price
        .parse()
        .map_err(|_| FetchError::MalformedPrice(price.to_string()))
}

/// Numeric kline field, sent either as a numeric string or a JSON number
fn field_f64(row: &[Value], field: usize, index: usize) -> Result<f64, FetchError> {
    let parsed = match &row[field] {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| FetchError::MalformedRow {
        index,
        reason: format!("field {} is not numeric: {}", field, row[field]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::BarColor;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use url::Url;

    fn row(
        open_ms: i64,
        open: &str,
        high: &str,
        low: &str,
        close: &str,
        volume: &str,
    ) -> Vec<Value> {
        vec![
            json!(open_ms),
            json!(open),
            json!(high),
            json!(low),
            json!(close),
            json!(volume),
            json!(open_ms + 59_999),
            json!("0"),
        ]
    }

    fn generated_rows(count: usize, step_ms: i64) -> Vec<Vec<Value>> {
        (0..count)
            .map(|i| {
                let open = 100.0 + i as f64;
                let close = if i % 3 == 0 { open - 1.0 } else { open + 1.0 };
                row(
                    1_700_000_000_000 + i as i64 * step_ms,
                    &open.to_string(),
                    &(open + 2.0).to_string(),
                    &(open - 2.0).to_string(),
                    &close.to_string(),
                    "12.5",
                )
            })
            .collect()
    }

    /// Accept one connection, answer with a canned response and hand back
    /// the raw request head.
    async fn serve_once(status: &'static str, body: String) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (Url::parse(&format!("http://{}", addr)).unwrap(), handle)
    }

    fn local_feed(host: Url) -> BinanceDatafeed {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        BinanceDatafeed::new(BinanceRestClient::with_client(client, host), "btcusdt")
    }

    #[test]
    fn test_parse_single_row() {
        let rows = vec![row(1_700_000_000_000, "100", "110", "90", "105", "50")];
        let series = parse_klines(&rows).unwrap();

        assert_eq!(
            series.candles[0],
            Candle {
                time: 1_700_000_000,
                open: 100.0,
                high: 110.0,
                low: 90.0,
                close: 105.0,
            }
        );
        assert_eq!(series.volumes[0].time, 1_700_000_000);
        assert_eq!(series.volumes[0].value, 50.0);
        assert_eq!(series.volumes[0].color, BarColor::Up);
    }

    #[test]
    fn test_parse_keeps_arrays_paired() {
        let rows = generated_rows(500, 3_600_000);
        let series = parse_klines(&rows).unwrap();

        assert_eq!(series.candles.len(), 500);
        assert_eq!(series.volumes.len(), 500);
        for ((candle, volume), row) in series.candles.iter().zip(&series.volumes).zip(&rows) {
            assert_eq!(candle.time, row[0].as_i64().unwrap() / 1000);
            assert_eq!(candle.time, volume.time);
            assert_eq!(volume.color == BarColor::Up, candle.close >= candle.open);
        }
    }

    #[test]
    fn test_parse_accepts_numeric_fields() {
        let rows = vec![vec![
            json!(1_700_000_000_000i64),
            json!(1.5),
            json!(2),
            json!(1),
            json!(1.0),
            json!(3),
        ]];
        let series = parse_klines(&rows).unwrap();
        assert_eq!(series.candles[0].open, 1.5);
        assert_eq!(series.volumes[0].color, BarColor::Down);
    }

    #[test]
    fn test_parse_rejects_short_row() {
        let rows = vec![vec![json!(1_700_000_000_000i64), json!("1"), json!("2")]];
        let err = parse_klines(&rows).unwrap_err();
        assert!(matches!(err, FetchError::MalformedRow { index: 0, .. }));
    }

    #[test]
    fn test_parse_rejects_non_numeric_field() {
        let mut rows = generated_rows(3, 60_000);
        rows[2][4] = json!("abc");
        let err = parse_klines(&rows).unwrap_err();
        assert!(matches!(err, FetchError::MalformedRow { index: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_non_increasing_times() {
        let mut rows = generated_rows(3, 60_000);
        rows[2][0] = rows[1][0].clone();
        let err = parse_klines(&rows).unwrap_err();
        assert!(matches!(err, FetchError::NonMonotonic { index: 2 }));
    }

    #[test]
    fn test_parse_empty_response() {
        let series = parse_klines(&[]).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_parse_ticker_price() {
        let price = parse_ticker_price(r#"{"symbol":"BTCUSDT","price":"43000.10000000"}"#).unwrap();
        assert_eq!(price, 43000.1);
        let err = parse_ticker_price(r#"{"symbol":"BTCUSDT","price":"n/a"}"#).unwrap_err();
        assert!(matches!(err, FetchError::MalformedPrice(p) if p == "n/a"));
        assert!(matches!(parse_ticker_price("{}"), Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_candles_sends_query_params() {
        let body = serde_json::to_string(&generated_rows(500, 3_600_000)).unwrap();
        let (host, server) = serve_once("200 OK", body).await;

        let series = local_feed(host).fetch_candles(TimeFrame::Hour1, 500).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("GET /api/v3/klines?symbol=BTCUSDT&interval=1h&limit=500 "));
        assert_eq!(series.candles.len(), 500);
        assert_eq!(series.volumes.len(), 500);
    }

    #[tokio::test]
    async fn test_fetch_candles_for_every_time_frame() {
        for time_frame in TimeFrame::ALL {
            let rows = generated_rows(20, time_frame.seconds() * 1000);
            let body = serde_json::to_string(&rows).unwrap();
            let (host, server) = serve_once("200 OK", body).await;

            let series = local_feed(host).fetch_candles(time_frame, 20).await.unwrap();
            let request = server.await.unwrap();

            let expected = format!("interval={}&limit=20 ", time_frame.value());
            assert!(request.contains(&expected), "{time_frame}: {request}");
            assert_eq!(series.candles.len(), 20);
            assert_eq!(series.volumes.len(), 20);
            for ((candle, volume), row) in series.candles.iter().zip(&series.volumes).zip(&rows) {
                assert_eq!(candle.time, row[0].as_i64().unwrap() / 1000);
                assert_eq!(candle.time, volume.time);
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_two_one_minute_candles() {
        let body = serde_json::to_string(&generated_rows(2, 60_000)).unwrap();
        let (host, server) = serve_once("200 OK", body).await;

        let series = local_feed(host).fetch_candles(TimeFrame::Minute1, 2).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.contains("interval=1m&limit=2"));
        assert_eq!(series.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_candles_non_2xx_is_status_error() {
        let body = r#"{"code":-1121,"msg":"Invalid symbol."}"#.to_string();
        let (host, _server) = serve_once("400 Bad Request", body).await;

        let err = local_feed(host).fetch_candles(TimeFrame::Day1, 500).await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid symbol"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_candles_rate_limited() {
        let (host, _server) = serve_once("429 Too Many Requests", "{}".to_string()).await;
        let err = local_feed(host).fetch_candles(TimeFrame::Minute5, 10).await.unwrap_err();
        assert!(matches!(err, FetchError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_fetch_candles_rejects_limit_before_request() {
        let feed = local_feed(Url::parse("http://127.0.0.1:9").unwrap());
        assert!(matches!(
            feed.fetch_candles(TimeFrame::Hour1, 0).await,
            Err(FetchError::InvalidLimit(0))
        ));
        assert!(matches!(
            feed.fetch_candles(TimeFrame::Hour1, 1001).await,
            Err(FetchError::InvalidLimit(1001))
        ));
    }

    #[tokio::test]
    async fn test_fetch_current_price() {
        let body = r#"{"symbol":"BTCUSDT","price":"64250.01000000"}"#.to_string();
        let (host, server) = serve_once("200 OK", body).await;

        let price = local_feed(host).fetch_current_price().await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("GET /api/v3/ticker/price?symbol=BTCUSDT "));
        assert_eq!(price, 64250.01);
    }

    #[tokio::test]
    async fn test_fetch_current_price_server_error() {
        let (host, _server) = serve_once("503 Service Unavailable", String::new()).await;
        let err = local_feed(host).fetch_current_price().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }
}
