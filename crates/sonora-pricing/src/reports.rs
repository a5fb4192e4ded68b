//! # Reporting Aggregations
//!
//! Pure fold-over-slice summaries for the office dashboard. The caller
//! loads the records; nothing here touches storage.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dashboard Numbers                                  │
//! │                                                                         │
//! │  &[Invoice] ──► revenue_summary ──► invoiced / collected / outstanding │
//! │             ──► monthly_revenue ──► per-month buckets, oldest first    │
//! │  &[Quote]   ──► quote_pipeline  ──► status counts, win rate, open $    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::invoice::{Invoice, InvoiceStatus};
use crate::quote::{Quote, QuoteStatus};

// =============================================================================
// Revenue Summary
// =============================================================================

/// Lifetime invoice totals for the dashboard header cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenueSummary {
    pub invoice_count: i64,
    pub draft_count: i64,
    pub sent_count: i64,
    pub paid_count: i64,
    pub void_count: i64,

    /// Sum of non-void invoice totals. Voids never happened.
    pub invoiced_cents: i64,

    /// Sum of non-void recorded payments.
    pub collected_cents: i64,

    /// Sum of balances on `Sent` invoices - money the clients still owe.
    pub outstanding_cents: i64,
}

/// Folds a slice of invoices into the dashboard summary.
pub fn revenue_summary(invoices: &[Invoice]) -> RevenueSummary {
    let mut summary = RevenueSummary {
        invoice_count: invoices.len() as i64,
        draft_count: 0,
        sent_count: 0,
        paid_count: 0,
        void_count: 0,
        invoiced_cents: 0,
        collected_cents: 0,
        outstanding_cents: 0,
    };

    for invoice in invoices {
        match invoice.status {
            InvoiceStatus::Draft => summary.draft_count += 1,
            InvoiceStatus::Sent => summary.sent_count += 1,
            InvoiceStatus::Paid => summary.paid_count += 1,
            InvoiceStatus::Void => summary.void_count += 1,
        }

        if invoice.status != InvoiceStatus::Void {
            summary.invoiced_cents += invoice.total_cents;
            summary.collected_cents += invoice.amount_paid_cents;
        }
        if invoice.status == InvoiceStatus::Sent {
            summary.outstanding_cents += invoice.balance_due().cents();
        }
    }

    summary
}

// =============================================================================
// Monthly Revenue
// =============================================================================

/// One month's bucket in the revenue chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub invoice_count: i64,
    pub invoiced_cents: i64,
    pub collected_cents: i64,
}

/// Buckets non-void invoices by creation month, oldest first.
///
/// Months with no invoices produce no bucket - the chart draws the gaps.
pub fn monthly_revenue(invoices: &[Invoice]) -> Vec<MonthlyRevenue> {
    let mut buckets: BTreeMap<(i32, u32), MonthlyRevenue> = BTreeMap::new();

    for invoice in invoices {
        if invoice.status == InvoiceStatus::Void {
            continue;
        }

        let key = (invoice.created_at.year(), invoice.created_at.month());
        let bucket = buckets.entry(key).or_insert(MonthlyRevenue {
            year: key.0,
            month: key.1,
            invoice_count: 0,
            invoiced_cents: 0,
            collected_cents: 0,
        });

        bucket.invoice_count += 1;
        bucket.invoiced_cents += invoice.total_cents;
        bucket.collected_cents += invoice.amount_paid_cents;
    }

    buckets.into_values().collect()
}

// =============================================================================
// Quote Pipeline
// =============================================================================

/// Quote funnel numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuotePipeline {
    pub quote_count: i64,
    pub pending_count: i64,
    pub sent_count: i64,
    pub accepted_count: i64,
    pub declined_count: i64,
    pub expired_count: i64,

    /// Accepted as a percentage of decided (accepted + declined).
    /// Expired quotes are not decisions - the client never answered.
    /// 0.0 when nothing has been decided yet.
    pub win_rate_pct: f64,

    /// Band sums over open (pending + sent) quotes.
    pub open_value_min_cents: i64,
    pub open_value_max_cents: i64,
}

/// Folds a slice of quotes into the pipeline summary.
pub fn quote_pipeline(quotes: &[Quote]) -> QuotePipeline {
    let mut pipeline = QuotePipeline {
        quote_count: quotes.len() as i64,
        pending_count: 0,
        sent_count: 0,
        accepted_count: 0,
        declined_count: 0,
        expired_count: 0,
        win_rate_pct: 0.0,
        open_value_min_cents: 0,
        open_value_max_cents: 0,
    };

    for quote in quotes {
        match quote.status {
            QuoteStatus::Pending => pipeline.pending_count += 1,
            QuoteStatus::Sent => pipeline.sent_count += 1,
            QuoteStatus::Accepted => pipeline.accepted_count += 1,
            QuoteStatus::Declined => pipeline.declined_count += 1,
            QuoteStatus::Expired => pipeline.expired_count += 1,
        }

        if !quote.status.is_terminal() {
            pipeline.open_value_min_cents += quote.min_total_cents;
            pipeline.open_value_max_cents += quote.max_total_cents;
        }
    }

    let decided = pipeline.accepted_count + pipeline.declined_count;
    if decided > 0 {
        pipeline.win_rate_pct = pipeline.accepted_count as f64 / decided as f64 * 100.0;
    }

    pipeline
}

// =============================================================================
// Unit Tests
// =============================================================================
