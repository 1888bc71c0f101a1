//! In-memory repositories for local runs, demos, and tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::clients::{ClientId, ClientRecord, ClientRepository};
use crate::repository::RepositoryError;
use crate::settings::{CostParameterRepository, CostParameterSet, ParameterSetId, RemovalRefusal};
use crate::simulation::{ScenarioId, ScenarioRecord, ScenarioRepository};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store poisoned".to_string()))
}

/// Parameter sets behind one lock, so activation flips are atomic.
#[derive(Default, Clone)]
pub struct InMemoryCostParameterRepository {
    sets: Arc<Mutex<HashMap<ParameterSetId, CostParameterSet>>>,
}

impl CostParameterRepository for InMemoryCostParameterRepository {
    fn insert_active(&self, record: CostParameterSet) -> Result<CostParameterSet, RepositoryError> {
        let mut guard = lock(&self.sets)?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        for set in guard.values_mut() {
            set.is_active = false;
        }
        let record = CostParameterSet {
            is_active: true,
            ..record
        };
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn activate(&self, id: &ParameterSetId) -> Result<CostParameterSet, RepositoryError> {
        let mut guard = lock(&self.sets)?;
        if !guard.contains_key(id) {
            return Err(RepositoryError::NotFound);
        }
        for set in guard.values_mut() {
            set.is_active = &set.id == id;
        }
        guard.get(id).cloned().ok_or(RepositoryError::NotFound)
    }

    fn fetch(&self, id: &ParameterSetId) -> Result<Option<CostParameterSet>, RepositoryError> {
        Ok(lock(&self.sets)?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<CostParameterSet>, RepositoryError> {
        Ok(lock(&self.sets)?.values().cloned().collect())
    }

    fn active(&self) -> Result<Option<CostParameterSet>, RepositoryError> {
        Ok(lock(&self.sets)?.values().find(|set| set.is_active).cloned())
    }

    fn remove_inactive(&self, id: &ParameterSetId) -> Result<CostParameterSet, RemovalRefusal> {
        let mut guard = lock(&self.sets)?;
        let record = guard.get(id).ok_or(RemovalRefusal::NotFound)?;
        if guard.len() <= 1 {
            return Err(RemovalRefusal::LastSet);
        }
        if record.is_active {
            return Err(RemovalRefusal::ActiveSet);
        }
        guard.remove(id).ok_or(RemovalRefusal::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryClientRepository {
    records: Arc<Mutex<HashMap<ClientId, ClientRecord>>>,
}

impl ClientRepository for InMemoryClientRepository {
    fn upsert(&self, record: ClientRecord) -> Result<ClientRecord, RepositoryError> {
        lock(&self.records)?.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ClientId) -> Result<Option<ClientRecord>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<ClientRecord>, RepositoryError> {
        Ok(lock(&self.records)?.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryScenarioRepository {
    records: Arc<Mutex<HashMap<ScenarioId, ScenarioRecord>>>,
}

impl ScenarioRepository for InMemoryScenarioRepository {
    fn insert(&self, record: ScenarioRecord) -> Result<ScenarioRecord, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ScenarioId) -> Result<Option<ScenarioRecord>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<ScenarioRecord>, RepositoryError> {
        Ok(lock(&self.records)?.values().cloned().collect())
    }
}
