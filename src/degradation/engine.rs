//! Degradation engine: health checks, recovery, and level transitions

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::features::{feature_available, FEATURES};
use super::level::DegradationLevel;
use super::probes::{default_probes, HealthProbe};
use super::state::{ComponentId, HealthStatus, StateStore, SystemState};
use crate::config::DpConfig;
use crate::fs::project::ProjectDir;

/// Level implied by the current component map. First match wins: git
/// trouble is SAFE, config trouble MANUAL, tracker or daemon trouble REDUCED.
pub fn compute_level(components: &BTreeMap<ComponentId, HealthStatus>) -> DegradationLevel {
    let unhealthy: Vec<ComponentId> = components
        .values()
        .filter(|status| !status.healthy)
        .map(|status| status.component)
        .collect();

    if unhealthy.is_empty() {
        DegradationLevel::Full
    } else if unhealthy.contains(&ComponentId::Git) {
        DegradationLevel::Safe
    } else if unhealthy.contains(&ComponentId::Config) {
        DegradationLevel::Manual
    } else if unhealthy.contains(&ComponentId::TaskTracker)
        || unhealthy.contains(&ComponentId::Daemon)
    {
        DegradationLevel::Reduced
    } else {
        DegradationLevel::Full
    }
}

fn transition_reason(state: &SystemState, level: DegradationLevel) -> String {
    let unhealthy: Vec<&str> = state.unhealthy().map(|s| s.component.as_str()).collect();
    if level == DegradationLevel::Full {
        "All components healthy".to_string()
    } else if unhealthy.is_empty() {
        format!("Transitioning to {level}")
    } else {
        format!("Issues with: {}", unhealthy.join(", "))
    }
}

/// Snapshot of the state plus what it means for features.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub level: DegradationLevel,
    pub level_description: String,
    pub locked: bool,
    pub lock_reason: String,
    pub last_transition: DateTime<Utc>,
    pub transition_reason: String,
    pub components: BTreeMap<ComponentId, HealthStatus>,
    pub available_features: BTreeMap<String, bool>,
}

pub struct DegradationEngine {
    store: StateStore,
    probes: Vec<Box<dyn HealthProbe>>,
}

impl DegradationEngine {
    /// Engine for a project with the standard probes for `config`.
    pub fn for_project(project: &ProjectDir, config: &DpConfig) -> Self {
        Self::with_probes(
            project.degradation_state_file(),
            default_probes(project.root(), config),
        )
    }

    pub fn with_probes(state_file: impl Into<PathBuf>, probes: Vec<Box<dyn HealthProbe>>) -> Self {
        Self {
            store: StateStore::new(state_file),
            probes,
        }
    }

    pub fn state_file(&self) -> &Path {
        self.store.path()
    }

    pub fn state(&self) -> SystemState {
        self.store.load()
    }

    /// Health-check persistence is best effort; a failed write is logged.
    fn save(&self, state: &SystemState) {
        if let Err(e) = self.store.save(state) {
            let error = format!("{e:#}");
            warn!(%error, "failed to persist degradation state");
        }
    }

    fn probe(&self, probe: &dyn HealthProbe) -> HealthStatus {
        let component = probe.component();
        match probe.check() {
            Ok(status) => {
                debug!(%component, healthy = status.healthy, message = %status.message, "health check");
                status
            }
            Err(e) => {
                let message = format!("{component} check failed: {e:#}");
                warn!(%component, %message, "health check errored");
                HealthStatus::unhealthy(component, message)
            }
        }
    }

    /// Probe every component, attempt recovery when degrading, and persist
    /// the resulting level.
    pub fn run_health_checks(&self) -> SystemState {
        let mut state = self.store.load();

        for probe in &self.probes {
            let component = probe.component();
            let fresh = self
                .probe(probe.as_ref())
                .continue_episode(state.components.get(&component));
            state.components.insert(component, fresh);
        }

        let mut level = compute_level(&state.components);
        if level > state.level {
            self.attempt_recovery(&mut state);
            level = compute_level(&state.components);
        }

        if state.locked {
            debug!(level = %state.level, candidate = %level, "level locked");
        } else if level != state.level {
            let reason = transition_reason(&state, level);
            if level > state.level {
                warn!(from = %state.level, to = %level, %reason, "degrading");
            } else {
                info!(from = %state.level, to = %level, %reason, "recovering");
            }
            state.level = level;
            state.last_transition = Utc::now();
            state.transition_reason = reason;
        }

        self.save(&state);
        state
    }

    /// One recovery attempt per unhealthy component per episode.
    ///
    /// Every unhealthy entry in the state is offered recovery, including
    /// entries left over from a probe that is no longer registered (say a
    /// daemon entry after switching trackers). Those have no recovery action,
    /// so the attempt is recorded as failed; `reset_to_full` clears them.
    fn attempt_recovery(&self, state: &mut SystemState) {
        let pending: Vec<ComponentId> = state
            .unhealthy()
            .filter(|status| !status.recovery_attempted)
            .map(|status| status.component)
            .collect();

        for component in pending {
            let probe = self.probes.iter().find(|p| p.component() == component);
            let succeeded = match probe {
                Some(probe) => probe.recover().unwrap_or_else(|e| {
                    let error = format!("{e:#}");
                    warn!(%component, %error, "recovery errored");
                    false
                }),
                None => {
                    warn!(%component, "no probe registered; stale entry cannot recover");
                    false
                }
            };
            info!(%component, succeeded, "recovery attempted");

            if let (true, Some(probe)) = (succeeded, probe) {
                let mut recheck = self.probe(probe.as_ref());
                recheck.recovery_attempted = true;
                recheck.recovery_succeeded = true;
                state.components.insert(component, recheck);
            } else if let Some(status) = state.components.get_mut(&component) {
                status.recovery_attempted = true;
                status.recovery_succeeded = succeeded;
            }
        }
    }

    pub fn current_level(&self) -> DegradationLevel {
        self.store.load().level
    }

    pub fn is_feature_available(&self, feature: &str) -> bool {
        feature_available(self.current_level(), feature)
    }

    /// Freeze the level until [`unlock`](Self::unlock). Fails if the lock
    /// could not be persisted.
    pub fn lock(&self, reason: &str) -> Result<SystemState> {
        let mut state = self.store.load();
        state.locked = true;
        state.lock_reason = reason.to_string();
        self.store.save(&state).context("Failed to persist lock")?;
        info!(level = %state.level, reason, "degradation level locked");
        Ok(state)
    }

    pub fn unlock(&self) -> Result<SystemState> {
        let mut state = self.store.load();
        state.locked = false;
        state.lock_reason.clear();
        self.store.save(&state).context("Failed to persist unlock")?;
        info!(level = %state.level, "degradation level unlocked");
        Ok(state)
    }

    /// Discard all state, lock included.
    pub fn reset_to_full(&self) -> Result<SystemState> {
        let state = SystemState::default();
        self.store
            .save(&state)
            .context("Failed to persist degradation reset")?;
        info!("degradation state reset to FULL");
        Ok(state)
    }

    pub fn status_report(&self) -> StatusReport {
        let state = self.store.load();
        let available_features = FEATURES
            .iter()
            .map(|(name, _)| (name.to_string(), feature_available(state.level, name)))
            .collect();

        StatusReport {
            level: state.level,
            level_description: state.level.description().to_string(),
            locked: state.locked,
            lock_reason: state.lock_reason,
            last_transition: state.last_transition,
            transition_reason: state.transition_reason,
            components: state.components,
            available_features,
        }
    }
}
