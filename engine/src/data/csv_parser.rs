use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use shared::models::{Trade, TradeSide};
use std::fs::File;
use std::io::BufReader;
use uuid::Uuid;

// Parses journal trade exports.
//
// CSV header: Symbol,Side,Quantity,Entry Time,Entry Price,Exit Time,Exit Price,Fees
// Example row: BTCUSDT,Long,0.5,2024-03-01 09:30:00,61250.0,2024-03-01 14:10:00,62100.0,4.25
// Exit Time/Exit Price are left empty for positions that are still open.
pub struct TradeCsvParser;

impl TradeCsvParser {
    pub fn load_trades_from_csv(file_path: &str, account: &str) -> Result<Vec<Trade>> {
        let file = File::open(file_path)
            .map_err(|e| anyhow!("Failed to open CSV file '{}': {}", file_path, e))?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers()?.clone();
        let mut trades = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2; // header is line 1
            let record =
                result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;

            let symbol = Self::required_field(&record, &headers, "Symbol", line)?;
            let side: TradeSide = Self::required_field(&record, &headers, "Side", line)?
                .parse()
                .map_err(|e| anyhow!("Error parsing 'Side' at line {}: {}", line, e))?;

            let quantity = parse_number(
                Self::required_field(&record, &headers, "Quantity", line)?,
                "Quantity",
                line,
            )?;
            if quantity <= 0.0 {
                return Err(anyhow!(
                    "Invalid 'Quantity' at line {}: must be positive, got {}",
                    line,
                    quantity
                ));
            }

            let entry_time = parse_datetime(
                Self::required_field(&record, &headers, "Entry Time", line)?,
                "Entry Time",
                line,
            )?;
            let entry_price = parse_number(
                Self::required_field(&record, &headers, "Entry Price", line)?,
                "Entry Price",
                line,
            )?;

            let exit_time_str = Self::optional_field(&record, &headers, "Exit Time");
            let exit_price_str = Self::optional_field(&record, &headers, "Exit Price");
            let (exit_time, exit_price) = match (exit_time_str, exit_price_str) {
                (Some(t), Some(p)) => (
                    Some(parse_datetime(t, "Exit Time", line)?),
                    Some(parse_number(p, "Exit Price", line)?),
                ),
                (None, None) => (None, None),
                _ => {
                    return Err(anyhow!(
                        "Inconsistent exit fields at line {}: 'Exit Time' and 'Exit Price' must both be set or both be empty",
                        line
                    ));
                }
            };

            let fees = match Self::optional_field(&record, &headers, "Fees") {
                Some(f) => parse_number(f, "Fees", line)?,
                None => 0.0,
            };

            // Realized PnL only exists once the position is closed.
            let pnl = exit_price.map(|exit| (exit - entry_price) * quantity * side.sign() - fees);

            trades.push(Trade {
                id: Uuid::new_v4(),
                account: account.to_string(),
                symbol: symbol.to_string(),
                side,
                quantity,
                entry_time,
                entry_price,
                exit_time,
                exit_price,
                fees,
                pnl,
            });
        }
        Ok(trades)
    }

    fn required_field<'a>(
        record: &'a StringRecord,
        headers: &StringRecord,
        name: &str,
        line: usize,
    ) -> Result<&'a str> {
        Self::optional_field(record, headers, name)
            .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
    }

    // Empty cells and absent columns both read as None.
    fn optional_field<'a>(
        record: &'a StringRecord,
        headers: &StringRecord,
        name: &str,
    ) -> Option<&'a str> {
        let pos = headers.iter().position(|header| header == name)?;
        match record.get(pos).map(str::trim) {
            Some("") | None => None,
            Some(value) => Some(value),
        }
    }
}

fn parse_number(s: &str, field: &str, line: usize) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|e| anyhow!("Error parsing '{}' at line {}: {}", field, line, e))
}

// Journal exports use "YYYY-MM-DD HH:MM:SS", assumed UTC.
fn parse_datetime(s: &str, field: &str, line: usize) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S")
        .map_err(|e| anyhow!("Error parsing '{}' at line {}: {}", field, line, e))?;
    Ok(DateTime::from_naive_utc_and_offset(naive, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    const HEADER: &str = "Symbol,Side,Quantity,Entry Time,Entry Price,Exit Time,Exit Price,Fees";

    #[test]
    fn load_trades_valid_data() {
        let csv_content = format!(
            "{}\n\
             BTCUSDT,Long,0.5,2024-03-01 09:30:00,61250.0,2024-03-01 14:10:00,62100.0,4.25\n\
             ETHUSDT,Short,2.0,2024-03-02 10:00:00,3300.0,2024-03-02 11:30:00,3250.0,1.50\n\
             SOLUSDT,Long,10.0,2024-03-03 12:00:00,145.0,,,0.0",
            HEADER
        );
        let tmp_file = create_test_csv(&csv_content);
        let trades =
            TradeCsvParser::load_trades_from_csv(tmp_file.path().to_str().unwrap(), "main").unwrap();

        assert_eq!(trades.len(), 3);

        let long = &trades[0];
        assert_eq!(long.symbol, "BTCUSDT");
        assert_eq!(long.account, "main");
        assert_eq!(long.side, TradeSide::Long);
        // (62100 - 61250) * 0.5 - 4.25
        assert!((long.pnl.unwrap() - 420.75).abs() < 1e-9);

        let short = &trades[1];
        assert_eq!(short.side, TradeSide::Short);
        // (3250 - 3300) * 2.0 * -1 - 1.50
        assert!((short.pnl.unwrap() - 98.5).abs() < 1e-9);

        let open = &trades[2];
        assert!(!open.is_closed());
        assert_eq!(open.pnl, None);
        assert_eq!(open.exit_price, None);
    }

    #[test]
    fn load_trades_empty_file() {
        let tmp_file = create_test_csv(HEADER);
        let trades =
            TradeCsvParser::load_trades_from_csv(tmp_file.path().to_str().unwrap(), "main").unwrap();
        assert!(trades.is_empty());
    }

    #[test]
    fn load_trades_missing_column() {
        let csv_content = "Symbol,Side,Quantity,Entry Price\nBTCUSDT,Long,0.5,61250.0";
        let tmp_file = create_test_csv(csv_content);
        let result = TradeCsvParser::load_trades_from_csv(tmp_file.path().to_str().unwrap(), "main");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Missing 'Entry Time' field"));
    }

    #[test]
    fn load_trades_bad_side() {
        let csv_content = format!(
            "{}\nBTCUSDT,Sideways,0.5,2024-03-01 09:30:00,61250.0,,,0.0",
            HEADER
        );
        let tmp_file = create_test_csv(&csv_content);
        let result = TradeCsvParser::load_trades_from_csv(tmp_file.path().to_str().unwrap(), "main");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Error parsing 'Side' at line 2"));
    }

    #[test]
    fn load_trades_exit_price_without_time() {
        let csv_content = format!(
            "{}\nBTCUSDT,Long,0.5,2024-03-01 09:30:00,61250.0,,62100.0,0.0",
            HEADER
        );
        let tmp_file = create_test_csv(&csv_content);
        let result = TradeCsvParser::load_trades_from_csv(tmp_file.path().to_str().unwrap(), "main");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Inconsistent exit fields at line 2"));
    }

    #[test]
    fn load_trades_negative_quantity() {
        let csv_content = format!(
            "{}\nBTCUSDT,Long,-0.5,2024-03-01 09:30:00,61250.0,,,0.0",
            HEADER
        );
        let tmp_file = create_test_csv(&csv_content);
        let result = TradeCsvParser::load_trades_from_csv(tmp_file.path().to_str().unwrap(), "main");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid 'Quantity' at line 2"));
    }
}
