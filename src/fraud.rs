use crate::capture::CaptureAttempt;
use crate::character::CharacterId;
use crate::creature::CreatureId;
use crate::store::GameStore;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// The anti-fraud rules that can fire. Wire names match the report
/// documents the triage tooling reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudRule {
    ExcessiveCaptures,
    SuspiciousIvs,
}

/// Triage lifecycle of a report. The core only ever writes `Pending`;
/// everything after that belongs to the external triage process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Dismissed,
}

/// One append-only row in the `fraud_reports` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudReport {
    pub id: Uuid,
    pub rule: FraudRule,
    pub character_id: CharacterId,
    pub creature_id: Option<CreatureId>,
    pub evidence: serde_json::Value,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Thresholds for the capture-review rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudRules {
    /// Trailing window for capture-flood counting.
    pub window_secs: u32,
    /// Attempts within the window above which flooding fires.
    pub capture_threshold: u32,
    /// Perfect (31) IVs at or above which the genetics rule fires.
    pub perfect_iv_threshold: u8,
}

impl Default for FraudRules {
    fn default() -> Self {
        FraudRules {
            window_secs: 60,
            capture_threshold: 10,
            perfect_iv_threshold: 5,
        }
    }
}

/// Review one capture attempt against the fraud rules.
///
/// Advisory only: reports are appended for external triage and the
/// triggering capture is never blocked or rolled back. Store failures here
/// are logged and swallowed, so a broken audit index can never take down
/// gameplay. Returns whatever reports were successfully appended.
pub fn review_capture(
    store: &dyn GameStore,
    rules: &FraudRules,
    attempt: &CaptureAttempt,
    now: DateTime<Utc>,
) -> Vec<FraudReport> {
    let mut reports = Vec::new();

    match store.capture_attempts_since(
        attempt.character_id,
        now - Duration::seconds(rules.window_secs as i64),
    ) {
        Ok(count) if count > rules.capture_threshold => {
            reports.push(FraudReport {
                id: Uuid::new_v4(),
                rule: FraudRule::ExcessiveCaptures,
                character_id: attempt.character_id,
                creature_id: attempt.creature_id,
                evidence: json!({
                    "capturesInWindow": count,
                    "windowSecs": rules.window_secs,
                    "speciesId": attempt.species.0,
                }),
                status: ReportStatus::Pending,
                created_at: now,
            });
        }
        Ok(_) => {}
        Err(err) => {
            tracing::warn!(character = %attempt.character_id, error = %err, "capture-flood check failed");
        }
    }

    if let Some(ivs) = attempt.ivs {
        let perfect = ivs.iter().filter(|&&iv| iv == 31).count() as u8;
        if perfect >= rules.perfect_iv_threshold {
            reports.push(FraudReport {
                id: Uuid::new_v4(),
                rule: FraudRule::SuspiciousIvs,
                character_id: attempt.character_id,
                creature_id: attempt.creature_id,
                evidence: json!({
                    "perfectIvs": perfect,
                    "ivs": ivs,
                }),
                status: ReportStatus::Pending,
                created_at: now,
            });
        }
    }

    reports.retain(|report| match store.append_fraud_report(report.clone()) {
        Ok(()) => {
            tracing::info!(
                character = %report.character_id,
                rule = ?report.rule,
                "fraud report filed"
            );
            true
        }
        Err(err) => {
            tracing::warn!(character = %report.character_id, error = %err, "fraud report dropped");
            false
        }
    });
    reports
}
