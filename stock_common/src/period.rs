//! History periods understood by the market-data provider.
//!
//! The server forwards whatever period string it receives; this enum exists so
//! the manifest can list the accepted values and so the host CLI can validate
//! its `--period` flag up front.

use clap::ValueEnum;
use strum_macros::{Display, EnumIter, EnumString};

/// Relative time range for historical data.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Default, ValueEnum, Display, EnumString, EnumIter, Hash, Eq, PartialEq)]
pub enum Period {
    #[strum(serialize = "1d")]
    #[value(name = "1d")]
    OneDay,
    #[strum(serialize = "5d")]
    #[value(name = "5d")]
    FiveDays,
    #[default]
    #[strum(serialize = "1mo")]
    #[value(name = "1mo")]
    OneMonth,
    #[strum(serialize = "3mo")]
    #[value(name = "3mo")]
    ThreeMonths,
    #[strum(serialize = "6mo")]
    #[value(name = "6mo")]
    SixMonths,
    #[strum(serialize = "1y")]
    #[value(name = "1y")]
    OneYear,
    #[strum(serialize = "2y")]
    #[value(name = "2y")]
    TwoYears,
    #[strum(serialize = "5y")]
    #[value(name = "5y")]
    FiveYears,
    #[strum(serialize = "10y")]
    #[value(name = "10y")]
    TenYears,
    #[strum(serialize = "ytd")]
    #[value(name = "ytd")]
    YearToDate,
    #[strum(serialize = "max")]
    #[value(name = "max")]
    Max,
}
