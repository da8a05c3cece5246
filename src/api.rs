use crate::config::RunParams;
use crate::error::TfResult;
use crate::loader;
use crate::optimizer::{Optimizer, ProgressCallback, RunReport};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::info;

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum ReportFormat {
    Table,
    Json,
}

impl ReportFormat {
    /// clap value parser listing the accepted names on failure.
    pub fn parse(s: &str) -> Result<Self, String> {
        s.parse().map_err(|_| {
            let names: Vec<String> = Self::iter().map(|f| f.to_string()).collect();
            format!("unknown format '{}', expected one of: {}", s, names.join(", "))
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvaluation {
    pub order: Vec<usize>,
    pub key: String,
    pub length: f64,
}

/// Service: load a city file and run the optimizer over it.
pub fn solve_file<P: AsRef<Path>, CB: ProgressCallback>(
    path: P,
    params: RunParams,
    callback: &CB,
) -> TfResult<RunReport> {
    let cities = loader::load_cities(path)?;
    let optimizer = Optimizer::new(cities, params)?;
    let report = optimizer.run(callback)?;
    info!(
        length = report.best.length,
        node = report.best.node_rank,
        "best tour found"
    );
    Ok(report)
}

/// Service: measure a caller-supplied visiting order over a city file.
pub fn evaluate_order<P: AsRef<Path>>(path: P, order: &str) -> TfResult<OrderEvaluation> {
    let cities = loader::load_cities(path)?;
    let tour = loader::parse_order(order, &cities)?;
    Ok(OrderEvaluation {
        order: tour.indices_in(&cities),
        key: tour.key().to_string(),
        length: tour.length(),
    })
}

/// Rounds to `digits` significant digits.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return format!("{}", value);
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = digits as i32 - 1 - magnitude;
    if decimals >= 0 {
        format!("{:.*}", decimals as usize, value)
    } else {
        let factor = 10f64.powi(-decimals);
        format!("{:.0}", (value / factor).round() * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4.0, "4.0000")]
    #[case(3.414213, "3.4142")]
    #[case(12345.67, "12346")]
    #[case(1234567.0, "1234600")]
    #[case(0.000123456, "0.00012346")]
    fn test_significant_digits(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_significant(value, 5), expected);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ReportFormat::parse("json"), Ok(ReportFormat::Json));
        assert_eq!(ReportFormat::Table.to_string(), "table");
        let err = ReportFormat::parse("xml").unwrap_err();
        assert!(err.contains("table, json"));
    }
}
