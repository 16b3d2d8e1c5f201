//! Shared application state for axum handlers.

use std::sync::Arc;

use careops_app::ports::{
    AlertRepository, AutomationRepository, BookingRepository, ContactRepository, Dispatcher,
    FormRepository, InventoryRepository, RealtimeBroadcaster, WorkspaceRepository,
};
use careops_app::realtime_bus::RealtimeBus;
use careops_app::services::alert_service::AlertService;
use careops_app::services::automation_service::AutomationService;
use careops_app::services::booking_service::BookingService;
use careops_app::services::contact_service::ContactService;
use careops_app::services::form_service::FormService;
use careops_app::services::inventory_service::InventoryService;
use careops_app::services::workspace_service::WorkspaceService;

/// The concrete adapter types a deployment plugs into the services.
///
/// Grouping them behind one trait keeps handler signatures at a single
/// type parameter.
pub trait Backend: 'static {
    type Workspaces: WorkspaceRepository + Send + Sync + 'static;
    type Rules: AutomationRepository + Send + Sync + 'static;
    type Contacts: ContactRepository + Send + Sync + 'static;
    type Bookings: BookingRepository + Send + Sync + 'static;
    type Inventory: InventoryRepository + Send + Sync + 'static;
    type Forms: FormRepository + Send + Sync + 'static;
    type Alerts: AlertRepository + Send + Sync + 'static;
    type Broadcaster: RealtimeBroadcaster + Send + Sync + 'static;
    type Dispatcher: Dispatcher + Send + Sync + 'static;
}

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the service types themselves do not
/// need to be `Clone`: only the `Arc` wrappers are cloned.
pub struct AppState<B: Backend> {
    pub workspace_service: Arc<WorkspaceService<B::Workspaces, B::Rules>>,
    pub automation_service: Arc<AutomationService<B::Rules>>,
    pub contact_service: Arc<ContactService<B::Contacts, B::Dispatcher>>,
    pub booking_service: Arc<BookingService<B::Bookings, B::Contacts, B::Dispatcher>>,
    pub inventory_service: Arc<InventoryService<B::Inventory, B::Dispatcher>>,
    pub form_service: Arc<FormService<B::Forms, B::Contacts, B::Dispatcher>>,
    pub alert_service: Arc<AlertService<B::Alerts, B::Broadcaster>>,
    /// Source of the SSE stream.
    pub realtime: Arc<RealtimeBus>,
}

impl<B: Backend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            workspace_service: Arc::clone(&self.workspace_service),
            automation_service: Arc::clone(&self.automation_service),
            contact_service: Arc::clone(&self.contact_service),
            booking_service: Arc::clone(&self.booking_service),
            inventory_service: Arc::clone(&self.inventory_service),
            form_service: Arc::clone(&self.form_service),
            alert_service: Arc::clone(&self.alert_service),
            realtime: Arc::clone(&self.realtime),
        }
    }
}

/// Services handed to [`AppState::new`].
pub struct Services<B: Backend> {
    pub workspaces: WorkspaceService<B::Workspaces, B::Rules>,
    pub automations: AutomationService<B::Rules>,
    pub contacts: ContactService<B::Contacts, B::Dispatcher>,
    pub bookings: BookingService<B::Bookings, B::Contacts, B::Dispatcher>,
    pub inventory: InventoryService<B::Inventory, B::Dispatcher>,
    pub forms: FormService<B::Forms, B::Contacts, B::Dispatcher>,
    pub alerts: AlertService<B::Alerts, B::Broadcaster>,
}

impl<B: Backend> AppState<B> {
    /// Create a new application state from service instances.
    pub fn new(services: Services<B>, realtime: Arc<RealtimeBus>) -> Self {
        Self {
            workspace_service: Arc::new(services.workspaces),
            automation_service: Arc::new(services.automations),
            contact_service: Arc::new(services.contacts),
            booking_service: Arc::new(services.bookings),
            inventory_service: Arc::new(services.inventory),
            form_service: Arc::new(services.forms),
            alert_service: Arc::new(services.alerts),
            realtime,
        }
    }
}
