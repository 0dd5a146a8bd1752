//! Chart payloads and the sink that renders them.
//!
//! The analysis layer only builds data: points, candles, fitted lines.
//! Drawing is left to a `ChartSink`. The bundled `JsonChartWriter` writes each
//! chart as a JSON document for an external plotting tool.

use crate::analysis::{AnalysisError, Candle, StockAnalyzer};
use crate::domain::ReturnSeries;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Number of samples on the fitted regression line.
const LINE_SAMPLES: usize = 50;

/// Extra room past the largest index return when drawing the fitted line.
const LINE_OVERHANG: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A labelled dated line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub label: String,
    pub points: Vec<LinePoint>,
}

impl LineSeries {
    fn from_returns(returns: &ReturnSeries) -> Self {
        Self {
            label: returns.symbol.clone(),
            points: returns
                .points
                .iter()
                .map(|p| LinePoint {
                    date: p.date,
                    value: p.value,
                })
                .collect(),
        }
    }

    fn from_values(label: impl Into<String>, dates: &[NaiveDate], values: &[f64]) -> Self {
        Self {
            label: label.into(),
            points: dates
                .iter()
                .zip(values)
                .map(|(&date, &value)| LinePoint { date, value })
                .collect(),
        }
    }
}

/// Something that can be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Returns {
        title: String,
        y_label: String,
        lines: Vec<LineSeries>,
    },
    Candlestick {
        title: String,
        candles: Vec<Candle>,
    },
    MovingAverages {
        title: String,
        lines: Vec<LineSeries>,
    },
    RegressionScatter {
        title: String,
        x_label: String,
        y_label: String,
        /// (index return, asset return) per day.
        points: Vec<(f64, f64)>,
        /// Samples of `alpha + beta * x`.
        fitted: Vec<(f64, f64)>,
    },
}

impl Chart {
    /// Short identifier, used in file names.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Returns { lines, .. } if lines.len() > 1 => "returns_vs_index",
            Self::Returns { .. } => "returns",
            Self::Candlestick { .. } => "candlestick",
            Self::MovingAverages { .. } => "moving_averages",
            Self::RegressionScatter { .. } => "ols",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Returns { title, .. }
            | Self::Candlestick { title, .. }
            | Self::MovingAverages { title, .. }
            | Self::RegressionScatter { title, .. } => title,
        }
    }
}

/// Daily returns of the asset alone.
pub fn returns_chart(analyzer: &StockAnalyzer) -> Result<Chart, AnalysisError> {
    let returns = analyzer.asset_returns()?;
    Ok(Chart::Returns {
        title: analyzer.ticker().to_string(),
        y_label: format!("Daily Returns of {}", analyzer.ticker()),
        lines: vec![LineSeries::from_returns(&returns)],
    })
}

/// Daily returns of the asset overlaid on the index.
pub fn returns_vs_index_chart(analyzer: &StockAnalyzer) -> Result<Chart, AnalysisError> {
    let asset = analyzer.asset_returns()?;
    let index = analyzer.index_returns()?;
    Ok(Chart::Returns {
        title: analyzer.ticker().to_string(),
        y_label: format!(
            "Daily Returns of {} against {}",
            analyzer.ticker(),
            index.symbol
        ),
        lines: vec![LineSeries::from_returns(&asset), LineSeries::from_returns(&index)],
    })
}

/// Resampled candles with summed volume.
pub fn candlestick_chart(analyzer: &StockAnalyzer, bucket_days: u32) -> Chart {
    Chart::Candlestick {
        title: analyzer.ticker().to_string(),
        candles: analyzer.candles(bucket_days),
    }
}

/// Close price with short and long moving averages.
pub fn moving_average_chart(analyzer: &StockAnalyzer, short: usize, long: usize) -> Chart {
    let dates = analyzer.asset().dates();
    let (short_ma, long_ma) = analyzer.moving_averages(short, long);
    Chart::MovingAverages {
        title: analyzer.ticker().to_string(),
        lines: vec![
            LineSeries::from_values("Close", &dates, &analyzer.asset().closes()),
            LineSeries::from_values(format!("{short}Day"), &dates, &short_ma),
            LineSeries::from_values(format!("{long}Day"), &dates, &long_ma),
        ],
    }
}

/// Scatter of asset vs index returns with the fitted regression line.
pub fn regression_chart(analyzer: &StockAnalyzer) -> Result<Chart, AnalysisError> {
    let asset = analyzer.asset_returns()?;
    let index = analyzer.index_returns()?;
    let fit = crate::analysis::fit(&asset, &index)?;

    let xs = index.values();
    let points: Vec<(f64, f64)> = xs.iter().copied().zip(asset.values()).collect();

    let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let fitted = linspace(x_min, x_max + LINE_OVERHANG, LINE_SAMPLES)
        .into_iter()
        .map(|x| (x, fit.predict(x)))
        .collect();

    Ok(Chart::RegressionScatter {
        title: analyzer.ticker().to_string(),
        x_label: format!("{} Returns", index.symbol),
        y_label: format!("{} returns", analyzer.ticker()),
        points,
        fitted,
    })
}

/// `count` evenly spaced samples over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Receives finished charts. Rendering is fire-and-forget.
pub trait ChartSink {
    fn render(&self, chart: &Chart);
}

/// Writes each chart to `{dir}/{ticker}_{kind}.json`.
#[derive(Debug, Clone)]
pub struct JsonChartWriter {
    dir: PathBuf,
    prefix: String,
}

impl JsonChartWriter {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn path_for(&self, chart: &Chart) -> PathBuf {
        self.dir.join(format!("{}_{}.json", self.prefix, chart.kind()))
    }

    fn write(&self, chart: &Chart, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(chart)?;
        std::fs::write(path, json)
    }
}

impl ChartSink for JsonChartWriter {
    fn render(&self, chart: &Chart) {
        let path = self.path_for(chart);
        match self.write(chart, &path) {
            Ok(()) => tracing::info!(
                title = chart.title(),
                "wrote {} chart to {}",
                chart.kind(),
                path.display()
            ),
            Err(e) => tracing::warn!("failed to write chart {}: {e}", path.display()),
        }
    }
}

/// Build every chart for `analyzer` and hand each to `sink`.
pub fn render_all(
    analyzer: &StockAnalyzer,
    sink: &dyn ChartSink,
    short_window: usize,
    long_window: usize,
    candle_bucket_days: u32,
) -> Result<(), AnalysisError> {
    sink.render(&returns_chart(analyzer)?);
    sink.render(&returns_vs_index_chart(analyzer)?);
    sink.render(&candlestick_chart(analyzer, candle_bucket_days));
    sink.render(&moving_average_chart(analyzer, short_window, long_window));
    sink.render(&regression_chart(analyzer)?);
    Ok(())
}
