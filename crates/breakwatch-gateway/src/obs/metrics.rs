//! Prometheus text rendering for the gateway.
//!
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering. Breaker state gauges are one-hot per breaker; an unreadable
//! breaker reports 0 for every state and is counted in
//! `breakwatch_breakers_unknown`.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use breakwatch_core::{BreakerState, BreakerStateRecord};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str(labels: &[(String, String)]) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();

        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();
        self.map
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| (label_str(r.key()), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (labels, val) in rows {
            if labels.is_empty() {
                let _ = writeln!(out, "{} {}", name, val);
            } else {
                let _ = writeln!(out, "{}{{{}}} {}", name, labels, val);
            }
        }
    }
}

#[derive(Default)]
pub struct GatewayMetrics {
    pub report_requests: CounterVec,
    pub registration_rejections: CounterVec,
}

impl GatewayMetrics {
    /// Render gateway counters plus the breaker states in `records`.
    pub fn render(&self, records: &[BreakerStateRecord]) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "# TYPE breakwatch_breakers_registered gauge");
        let _ = writeln!(out, "breakwatch_breakers_registered {}", records.len());

        let unknown = records.iter().filter(|r| !r.is_known()).count();
        let _ = writeln!(out, "# TYPE breakwatch_breakers_unknown gauge");
        let _ = writeln!(out, "breakwatch_breakers_unknown {}", unknown);

        let _ = writeln!(out, "# TYPE breakwatch_breaker_state gauge");
        for r in records {
            let name = escape_label(&r.name);
            for (state, on) in [
                (BreakerState::Closed, r.closed),
                (BreakerState::Open, r.open),
                (BreakerState::HalfOpen, r.half_open),
            ] {
                let _ = writeln!(
                    out,
                    "breakwatch_breaker_state{{name=\"{}\",state=\"{}\"}} {}",
                    name,
                    state.as_str(),
                    u8::from(on)
                );
            }
        }

        self.report_requests
            .render("breakwatch_report_requests_total", &mut out);
        self.registration_rejections
            .render("breakwatch_registration_rejections_total", &mut out);
        out
    }
}
