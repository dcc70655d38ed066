//! Navigation metrics.
//!
//! # Metrics
//! - `router_navigations_total` (counter): finished navigations by outcome
//! - `router_redirects_total` (counter): guard redirects by failed check
//! - `router_stale_results_total` (counter): handler results dropped because
//!   a newer navigation started first

use metrics::counter;

pub fn record_navigation(outcome: &'static str) {
    counter!("router_navigations_total", "outcome" => outcome).increment(1);
}

pub fn record_redirect(reason: &'static str) {
    counter!("router_redirects_total", "reason" => reason).increment(1);
}

pub fn record_stale_result() {
    counter!("router_stale_results_total").increment(1);
}
