//! Assembles the `SQLite`-backed services behind the HTTP state.

use std::marker::PhantomData;
use std::sync::Arc;

use careops_adapter_http_axum::state::{AppState, Backend, Services};
use careops_adapter_storage_sqlite_sqlx::{
    Database, SqliteAlertRepository, SqliteAutomationRepository, SqliteBookingRepository,
    SqliteContactRepository, SqliteFormRepository, SqliteInventoryRepository,
    SqliteWorkspaceRepository,
};
use careops_app::automation_engine::AutomationEngine;
use careops_app::ports::EmailSender;
use careops_app::realtime_bus::RealtimeBus;
use careops_app::services::alert_service::AlertService;
use careops_app::services::automation_service::AutomationService;
use careops_app::services::booking_service::BookingService;
use careops_app::services::contact_service::ContactService;
use careops_app::services::form_service::FormService;
use careops_app::services::inventory_service::InventoryService;
use careops_app::services::workspace_service::WorkspaceService;

/// The automation engine over the `SQLite` repositories.
pub type Engine<M> = AutomationEngine<
    SqliteAutomationRepository,
    SqliteWorkspaceRepository,
    SqliteContactRepository,
    SqliteAlertRepository,
    M,
    Arc<RealtimeBus>,
>;

/// [`Backend`] made of the `SQLite` repositories and the email sender `M`.
pub struct SqliteBackend<M>(PhantomData<fn() -> M>);

impl<M> Backend for SqliteBackend<M>
where
    M: EmailSender + Send + Sync + 'static,
{
    type Workspaces = SqliteWorkspaceRepository;
    type Rules = SqliteAutomationRepository;
    type Contacts = SqliteContactRepository;
    type Bookings = SqliteBookingRepository;
    type Inventory = SqliteInventoryRepository;
    type Forms = SqliteFormRepository;
    type Alerts = SqliteAlertRepository;
    type Broadcaster = Arc<RealtimeBus>;
    type Dispatcher = Engine<M>;
}

/// Build the handler state: one repository per port over the shared pool,
/// a single engine dispatching for every service, and `realtime` feeding
/// both the engine's alerts and the SSE stream.
#[must_use]
pub fn build_state<M>(
    db: &Database,
    mailer: M,
    realtime: Arc<RealtimeBus>,
) -> AppState<SqliteBackend<M>>
where
    M: EmailSender + Send + Sync + 'static,
{
    let pool = db.pool();
    let workspaces = SqliteWorkspaceRepository::new(pool.clone());
    let rules = SqliteAutomationRepository::new(pool.clone());
    let contacts = SqliteContactRepository::new(pool.clone());
    let alerts = SqliteAlertRepository::new(pool.clone());

    let engine = Arc::new(AutomationEngine::new(
        rules.clone(),
        workspaces.clone(),
        contacts.clone(),
        alerts.clone(),
        mailer,
        Arc::clone(&realtime),
    ));

    let services = Services {
        workspaces: WorkspaceService::new(workspaces, rules.clone()),
        automations: AutomationService::new(rules),
        contacts: ContactService::new(contacts.clone(), Arc::clone(&engine)),
        bookings: BookingService::new(
            SqliteBookingRepository::new(pool.clone()),
            contacts.clone(),
            Arc::clone(&engine),
        ),
        inventory: InventoryService::new(
            SqliteInventoryRepository::new(pool.clone()),
            Arc::clone(&engine),
        ),
        forms: FormService::new(
            SqliteFormRepository::new(pool.clone()),
            contacts,
            engine,
        ),
        alerts: AlertService::new(alerts, Arc::clone(&realtime)),
    };

    AppState::new(services, realtime)
}
