use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use agentcast::broadcast::dispatch::{BroadcastJob, JobQueue, QueueError};
use agentcast::broadcast::preferences::{
    AgentDirectory, AgentId, CoverageArea, CoverageRepository, DirectoryError,
    NotificationPreference, PreferenceRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPreferenceRepository {
    records: Arc<Mutex<HashMap<AgentId, NotificationPreference>>>,
}

impl PreferenceRepository for InMemoryPreferenceRepository {
    fn upsert(
        &self,
        preference: NotificationPreference,
    ) -> Result<NotificationPreference, RepositoryError> {
        let mut guard = self.records.lock().expect("preference mutex poisoned");
        guard.insert(preference.agent_id.clone(), preference.clone());
        Ok(preference)
    }

    fn fetch(
        &self,
        agent_id: &AgentId,
    ) -> Result<Option<NotificationPreference>, RepositoryError> {
        let guard = self.records.lock().expect("preference mutex poisoned");
        Ok(guard.get(agent_id).cloned())
    }

    fn all(&self) -> Result<Vec<NotificationPreference>, RepositoryError> {
        let guard = self.records.lock().expect("preference mutex poisoned");
        let mut records: Vec<NotificationPreference> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.agent_id.cmp(&b.agent_id));
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCoverageRepository {
    rows: Arc<Mutex<Vec<CoverageArea>>>,
}

impl CoverageRepository for InMemoryCoverageRepository {
    fn replace_for(
        &self,
        agent_id: &AgentId,
        areas: Vec<CoverageArea>,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.rows.lock().expect("coverage mutex poisoned");
        guard.retain(|row| row.agent_id != *agent_id);
        guard.extend(areas);
        Ok(())
    }

    fn all(&self) -> Result<Vec<CoverageArea>, RepositoryError> {
        let guard = self.rows.lock().expect("coverage mutex poisoned");
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAgentDirectory {
    addresses: Arc<Mutex<HashMap<AgentId, String>>>,
}

impl InMemoryAgentDirectory {
    pub(crate) fn register(&self, agent_id: AgentId, email: &str) {
        let mut guard = self.addresses.lock().expect("directory mutex poisoned");
        guard.insert(agent_id, email.to_string());
    }
}

impl AgentDirectory for InMemoryAgentDirectory {
    fn email_for(&self, agent_id: &AgentId) -> Result<Option<String>, DirectoryError> {
        let guard = self.addresses.lock().expect("directory mutex poisoned");
        Ok(guard.get(agent_id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobQueue {
    batches: Arc<Mutex<Vec<Vec<BroadcastJob>>>>,
}

impl InMemoryJobQueue {
    pub(crate) fn batches(&self) -> Vec<Vec<BroadcastJob>> {
        self.batches.lock().expect("queue mutex poisoned").clone()
    }
}

impl JobQueue for InMemoryJobQueue {
    fn submit(&self, jobs: Vec<BroadcastJob>) -> Result<(), QueueError> {
        let mut guard = self.batches.lock().expect("queue mutex poisoned");
        guard.push(jobs);
        Ok(())
    }
}

pub(crate) fn parse_price_arg(raw: &str) -> Result<u32, String> {
    agentcast::broadcast::preferences::parse_price(raw).map_err(|err| err.to_string())
}
