//! The single signed-in identity and its persisted copy.

use std::sync::{RwLock, RwLockWriteGuard};
use tracing::{info, warn};

use super::{domain::DataStore, session::SessionStorage};
use crate::{
    error::StoreError,
    model::{
        role::Role,
        user::{ADMIN_ID, User},
    },
};

pub struct IdentityStore {
    current: RwLock<Option<User>>,
    storage: Box<dyn SessionStorage>,
    admin_email: String,
}

impl IdentityStore {
    pub fn new(storage: Box<dyn SessionStorage>, admin_email: impl Into<String>) -> Self {
        Self {
            current: RwLock::new(None),
            storage,
            admin_email: admin_email.into(),
        }
    }

    pub fn current(&self) -> Result<Option<User>, StoreError> {
        self.current
            .read()
            .map(|c| c.clone())
            .map_err(|_| StoreError::Unavailable)
    }

    fn lock(&self) -> Result<RwLockWriteGuard<'_, Option<User>>, StoreError> {
        self.current.write().map_err(|_| StoreError::Unavailable)
    }

    /// Admins match the one configured address; everyone else is looked up
    /// by exact email among the employees.
    pub fn sign_in(&self, email: &str, role: Role, domain: &DataStore) -> Result<User, StoreError> {
        let found = match role {
            Role::Admin if email == self.admin_email => Some(User::admin(&self.admin_email)),
            Role::Admin => None,
            Role::Employee => domain.find_employee_by_email(email)?.map(|e| e.identity()),
        };

        let user = found.ok_or(StoreError::InvalidCredentials)?;

        // persisted copy and `current` change under one guard
        let mut current = self.lock()?;
        self.storage.save(&user).map_err(|e| {
            tracing::error!(error = %e, "Failed to persist session");
            StoreError::Session(e.to_string())
        })?;
        *current = Some(user.clone());
        drop(current);

        info!(user_id = %user.id, role = %user.role, "Signed in");
        Ok(user)
    }

    pub fn sign_out(&self) -> Result<(), StoreError> {
        let mut current = self.lock()?;
        self.storage.clear().map_err(|e| {
            tracing::error!(error = %e, "Failed to remove persisted session");
            StoreError::Session(e.to_string())
        })?;
        *current = None;
        drop(current);

        info!("Signed out");
        Ok(())
    }

    /// Adopts the persisted identity if it still resolves against live data.
    /// A stale or unreadable copy is dropped.
    pub fn restore_on_startup(&self, domain: &DataStore) -> Result<Option<User>, StoreError> {
        let mut current = self.lock()?;

        let stored = match self.storage.load() {
            Ok(Some(user)) => user,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session");
                self.discard(&mut current)?;
                return Ok(None);
            }
        };

        let live = match stored.role {
            Role::Admin if stored.id == ADMIN_ID && stored.email == self.admin_email => {
                Some(User::admin(&self.admin_email))
            }
            Role::Admin => None,
            Role::Employee => match domain.employee(&stored.id) {
                Ok(employee) => Some(employee.identity()),
                Err(StoreError::EmployeeNotFound) => None,
                Err(e) => return Err(e),
            },
        };

        let Some(user) = live else {
            warn!(user_id = %stored.id, "Persisted identity no longer exists");
            self.discard(&mut current)?;
            return Ok(None);
        };

        if user != stored {
            self.storage
                .save(&user)
                .map_err(|e| StoreError::Session(e.to_string()))?;
        }
        *current = Some(user.clone());

        info!(user_id = %user.id, "Session restored");
        Ok(Some(user))
    }

    fn discard(&self, current: &mut Option<User>) -> Result<(), StoreError> {
        self.storage
            .clear()
            .map_err(|e| StoreError::Session(e.to_string()))?;
        *current = None;
        Ok(())
    }
}
