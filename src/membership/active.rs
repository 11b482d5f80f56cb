use std::sync::Arc;

use scholaris_core::{ClientError, ClientResult};
use scholaris_models::{AcademyId, AcademyMembership, MembershipStatus};
use tokio::sync::watch;

use crate::session::Session;

/// Which approved academy the dashboard is currently scoped to.
///
/// The selection is client-side only. It always names an APPROVED
/// membership, or nothing when there is none.
#[derive(Debug, Clone)]
pub struct ActiveAcademy {
    tx: Arc<watch::Sender<Option<AcademyId>>>,
}

impl Default for ActiveAcademy {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveAcademy {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> Option<AcademyId> {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<AcademyId>> {
        self.tx.subscribe()
    }

    /// # Errors
    ///
    /// [`ClientError::NotFound`] when `academy_id` is not an approved membership.
    pub fn select(&self, academy_id: AcademyId, memberships: &[AcademyMembership]) -> ClientResult<()> {
        let approved = memberships
            .iter()
            .any(|m| m.academy_id == academy_id && m.status == MembershipStatus::Approved);
        if !approved {
            return Err(ClientError::not_found(
                "You are not an approved member of that academy",
            ));
        }
        self.tx.send_if_modified(|current| {
            let changed = *current != Some(academy_id);
            *current = Some(academy_id);
            changed
        });
        Ok(())
    }

    /// Keeps the selection if it is still approved, else falls back to the
    /// first approved membership. Returns the resulting selection.
    pub fn revalidate(&self, memberships: &[AcademyMembership]) -> Option<AcademyId> {
        let next = resolve(self.get(), memberships);
        self.tx.send_if_modified(|current| {
            let changed = *current != next;
            *current = next;
            changed
        });
        next
    }

    /// The academy a session should be scoped to, without changing the selection.
    pub fn resolve(&self, session: &Session) -> Option<AcademyId> {
        resolve(self.get(), &session.memberships)
    }
}

fn resolve(current: Option<AcademyId>, memberships: &[AcademyMembership]) -> Option<AcademyId> {
    let mut approved = memberships
        .iter()
        .filter(|m| m.status == MembershipStatus::Approved)
        .map(|m| m.academy_id);
    match current {
        Some(id) if approved.clone().any(|a| a == id) => Some(id),
        _ => approved.next(),
    }
}
