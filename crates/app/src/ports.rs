//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod automation_repo;
pub mod dispatcher;
pub mod email;
pub mod realtime;
pub mod storage;

pub use automation_repo::AutomationRepository;
pub use dispatcher::Dispatcher;
pub use email::{EmailMessage, EmailSender};
pub use realtime::RealtimeBroadcaster;
pub use storage::{
    AlertRepository, BookingRepository, ContactRepository, FormRepository, InventoryRepository,
    WorkspaceRepository,
};
