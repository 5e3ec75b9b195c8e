// src/application/state.rs
//
// Planner context: the single owner of the wired planner components.
//
// Construction order:
// 1. Infrastructure (pool + schema, event bus)
// 2. Repository over the key-value store
// 3. Reminder store (loads persisted state)
//
// Nothing here is global; callers hold the context and shut it down.

use std::sync::Arc;

use crate::config::PlannerConfig;
use crate::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    ConnectionPool, DatabaseStats,
};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::repositories::{
    InMemoryKeyValueStore, KeyValueReminderRepository, KeyValueStore, ReminderRepository,
    SqliteKeyValueStore,
};
use crate::services::{LoggingScheduler, ReminderScheduler, ReminderStore, StoreOptions};

pub struct PlannerContext {
    config: PlannerConfig,

    /// Absent for in-memory contexts
    pool: Option<Arc<ConnectionPool>>,

    event_bus: Arc<EventBus>,
    store: ReminderStore,
}

impl PlannerContext {
    /// Open the configured database and load the planner from it.
    ///
    /// Alerts go to a `LoggingScheduler`.
    pub fn bootstrap(config: PlannerConfig) -> AppResult<Self> {
        Self::bootstrap_with_scheduler(config, Arc::new(LoggingScheduler))
    }

    pub fn bootstrap_with_scheduler(
        config: PlannerConfig,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> AppResult<Self> {
        // 1. INFRASTRUCTURE
        let pool = Arc::new(create_connection_pool(&config)?);

        // Initialize schema (idempotent)
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }

        // 2. STORAGE
        let entries: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(pool.clone()));

        let context = Self::assemble(config, Some(pool), entries, scheduler)?;
        log::info!(
            "Planner opened at {}",
            context.config.database_path.display()
        );
        Ok(context)
    }

    /// Context backed by process memory only; nothing survives `shutdown`
    pub fn in_memory(
        config: PlannerConfig,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> AppResult<Self> {
        let entries: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
        Self::assemble(config, None, entries, scheduler)
    }

    fn assemble(
        config: PlannerConfig,
        pool: Option<Arc<ConnectionPool>>,
        entries: Arc<dyn KeyValueStore>,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> AppResult<Self> {
        let event_bus = Arc::new(EventBus::new());
        let repository: Arc<dyn ReminderRepository> =
            Arc::new(KeyValueReminderRepository::new(entries));

        // 3. STORE
        let options = StoreOptions {
            formatter: config.formatter()?,
            duplicate_tolerance: config.duplicate_tolerance(),
        };
        let store = ReminderStore::initialize(repository, scheduler, event_bus.clone(), options)?;

        Ok(Self {
            config,
            pool,
            event_bus,
            store,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn store(&self) -> &ReminderStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ReminderStore {
        &mut self.store
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Storage statistics, when backed by a database
    pub fn database_stats(&self) -> AppResult<Option<DatabaseStats>> {
        match &self.pool {
            Some(pool) => {
                let conn = get_connection(pool)?;
                Ok(Some(get_database_stats(&conn)?))
            }
            None => Ok(None),
        }
    }

    /// Detach subscribers and release storage.
    ///
    /// Every mutation was already persisted, so there is nothing to flush.
    pub fn shutdown(self) {
        self.event_bus.clear_subscribers();
        log::info!(
            "Planner shut down with {} reminders",
            self.store.len()
        );
    }
}
