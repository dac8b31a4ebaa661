//! One sequential pass over the ticker universe

use crate::indicators::IndicatorError;
use crate::scan::context::ScanContext;
use crate::scan::types::{ScanSummary, TickerOutcome};
use crate::services::{build_universe, ChartData, CHART_POINTS};
use crate::signals::{Evaluation, SignalEngine, SignalReport, MIN_BARS};
use crate::state::DedupState;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, error, info};

const PROGRESS_EVERY: usize = 50;

pub struct Scanner {
    ctx: Arc<ScanContext>,
}

impl Scanner {
    pub fn new(ctx: Arc<ScanContext>) -> Self {
        Self { ctx }
    }

    /// Scan every ticker once for `today`.
    ///
    /// Collaborator failures are absorbed per ticker. An `IndicatorError`
    /// aborts the pass before the state is saved.
    pub async fn run(&self, today: NaiveDate) -> Result<ScanSummary, IndicatorError> {
        info!(date = %today, "--- STARTING STOCK SCAN ---");

        let tickers = build_universe(&self.ctx.ticker_sources).await;
        info!(total = tickers.len(), "Total unique stocks to scan: {}", tickers.len());

        let mut state = self.ctx.state_store.load().await;
        let mut summary = ScanSummary {
            universe: tickers.len(),
            ..ScanSummary::default()
        };

        for (i, ticker) in tickers.iter().enumerate() {
            if i > 0 && i % PROGRESS_EVERY == 0 {
                info!(done = i, total = tickers.len(), "Progress: {}/{}", i, tickers.len());
            }
            let outcome = self.scan_ticker(ticker, today, &mut state).await?;
            summary.record(ticker, outcome);
        }

        if let Err(e) = self.ctx.state_store.save(&state).await {
            error!(error = %e, "Failed to persist dedup state");
        }

        info!(
            notified = summary.notified.len(),
            delivery_failed = summary.delivery_failed.len(),
            already_notified = summary.already_notified,
            "--- SCAN COMPLETE ---"
        );
        Ok(summary)
    }

    /// Handle one ticker: dedup check, fetch, evaluate and (on a signal)
    /// report. Marks `state` only after a successful delivery.
    pub async fn scan_ticker(
        &self,
        ticker: &str,
        today: NaiveDate,
        state: &mut DedupState,
    ) -> Result<TickerOutcome, IndicatorError> {
        if state.notified_on(ticker, today) {
            debug!(ticker = %ticker, "Already notified today, skipping");
            return Ok(TickerOutcome::AlreadyNotified);
        }

        let history = self.ctx.price_history.fetch_history(ticker).await;
        if history.len() < MIN_BARS {
            debug!(
                ticker = %ticker,
                count = history.len(),
                min = MIN_BARS,
                "Not enough history ({} < {})",
                history.len(),
                MIN_BARS
            );
            return Ok(TickerOutcome::InsufficientHistory);
        }

        let Some(evaluation) = SignalEngine::evaluate(&history)? else {
            return Ok(TickerOutcome::NoSignal);
        };

        info!(ticker = %ticker, signal = %evaluation.signal, "🎯 Signal: {}", ticker);
        let signal = evaluation.signal;

        match self.report(ticker, &evaluation).await {
            Ok(()) => {
                state.mark(ticker, today);
                Ok(TickerOutcome::Notified(signal))
            }
            Err(e) => {
                error!(ticker = %ticker, error = %e, "Failed to deliver report for {}", ticker);
                Ok(TickerOutcome::DeliveryFailed(signal))
            }
        }
    }

    async fn report(
        &self,
        ticker: &str,
        evaluation: &Evaluation,
    ) -> crate::services::error::Result<()> {
        let fundamentals = self.ctx.fundamentals.lookup(ticker).await;
        let report = SignalReport {
            ticker: ticker.to_string(),
            name: fundamentals.name,
            signal: evaluation.signal,
            pe_ratio: fundamentals.pe_ratio,
            regime_start: evaluation.regime_start,
            price: evaluation.last_close(),
        };

        let chart = self
            .ctx
            .charts
            .render(ticker, &ChartData::from_evaluation(evaluation, CHART_POINTS))
            .await;

        self.ctx
            .notifier
            .deliver(&report.caption(), chart.as_deref())
            .await
    }
}
