//! Booking service: appointments for existing contacts.

use std::sync::Arc;

use careops_domain::booking::Booking;
use careops_domain::error::{CareOpsError, NotFoundError};
use careops_domain::id::WorkspaceId;
use careops_domain::time::now;

use crate::ports::{BookingRepository, ContactRepository, Dispatcher};
use crate::triggers::{DispatchMode, trigger_booking_created};

/// Application service for bookings.
pub struct BookingService<BR, CR, D> {
    bookings: BR,
    contacts: CR,
    dispatcher: Arc<D>,
}

impl<BR, CR, D> BookingService<BR, CR, D>
where
    BR: BookingRepository,
    CR: ContactRepository,
    D: Dispatcher + Send + Sync + 'static,
{
    /// Create a new service backed by the given repositories and dispatcher.
    pub fn new(bookings: BR, contacts: CR, dispatcher: Arc<D>) -> Self {
        Self {
            bookings,
            contacts,
            dispatcher,
        }
    }

    /// Create a booking for a contact of the same workspace, then run the
    /// `BOOKING_CREATED` automations before returning.
    ///
    /// # Errors
    ///
    /// Returns [`CareOpsError::Validation`] if invariants fail,
    /// [`CareOpsError::NotFound`] if the contact is not in the workspace, or
    /// a storage error from either repository.
    #[tracing::instrument(skip(self, booking), fields(workspace_id = %booking.workspace_id))]
    pub async fn create_booking(&self, mut booking: Booking) -> Result<Booking, CareOpsError> {
        booking.validate()?;
        let contact = self
            .contacts
            .get_by_id(booking.workspace_id, booking.contact_id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Contact",
                id: booking.contact_id.to_string(),
            })?;

        booking.created_at = now();
        let created = self.bookings.create(booking).await?;
        trigger_booking_created(
            &self.dispatcher,
            created.clone(),
            Some(contact),
            DispatchMode::Wait,
        )
        .await;
        Ok(created)
    }

    /// List the bookings of a workspace.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_bookings(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Booking>, CareOpsError> {
        self.bookings.list_by_workspace(workspace_id).await
    }
}
