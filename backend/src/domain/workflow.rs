//! Modal workflow state machine for the Residents screen.
//!
//! Governs which modal is active (create/edit form, read-only view, delete
//! confirmation) and which record it targets, and funnels every store
//! mutation through a busy guard so a second save or delete cannot start
//! while one is in flight. An in-flight mutation always runs to completion;
//! there is no cancellation and no queueing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use super::directory_service::ResidentDirectoryService;
use super::error::Error as EngineError;
use super::ports::ResidentRepository;
use super::resident::{ResidentKey, ResidentRecord};
use super::validation::ResidentDraft;

/// Which modal is active and which record it targets.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// No modal is open.
    Idle,
    /// The create/edit form is open. `target` is `None` for a new record.
    Editing {
        target: Option<ResidentKey>,
        draft: ResidentDraft,
    },
    /// A read-only snapshot of a record is displayed.
    Viewing { record: ResidentRecord },
    /// The delete confirmation is open for the targeted record.
    ConfirmingDelete { key: ResidentKey },
}

/// Errors raised by workflow transitions.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A save or delete has not resolved yet.
    #[error("a save or delete is already in flight")]
    Busy,
    /// The requested action is not available from the current state.
    #[error("the requested action is not available from the current state")]
    InvalidTransition,
    /// The store rejected the operation; the modal stays open for retry.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Clears the busy flag when an in-flight mutation resolves.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Workflow controller over the resident directory service.
pub struct WorkflowController<R> {
    service: ResidentDirectoryService<R>,
    state: Mutex<WorkflowState>,
    busy: AtomicBool,
}

impl<R> WorkflowController<R> {
    /// Create an idle controller over the service.
    pub fn new(service: ResidentDirectoryService<R>) -> Self {
        Self {
            service,
            state: Mutex::new(WorkflowState::Idle),
            busy: AtomicBool::new(false),
        }
    }

    /// The underlying directory service, for read-only views.
    pub fn service(&self) -> &ResidentDirectoryService<R> {
        &self.service
    }

    /// Snapshot of the current workflow state.
    pub fn state(&self) -> WorkflowState {
        self.lock_state().clone()
    }

    /// Whether a save or delete is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_not_busy(&self) -> Result<(), WorkflowError> {
        if self.is_busy() {
            return Err(WorkflowError::Busy);
        }
        Ok(())
    }

    fn acquire_busy(&self) -> Result<BusyGuard<'_>, WorkflowError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(WorkflowError::Busy);
        }
        Ok(BusyGuard(&self.busy))
    }
}

impl<R> WorkflowController<R>
where
    R: ResidentRepository,
{
    /// Open the create form with a blank draft. Only available from idle.
    pub fn open_add(&self) -> Result<(), WorkflowError> {
        self.ensure_not_busy()?;
        let mut state = self.lock_state();
        if *state != WorkflowState::Idle {
            return Err(WorkflowError::InvalidTransition);
        }
        *state = WorkflowState::Editing {
            target: None,
            draft: ResidentDraft::blank(),
        };
        Ok(())
    }

    /// Open the edit form pre-populated from the record's current values.
    pub async fn open_edit(&self, key: &ResidentKey) -> Result<(), WorkflowError> {
        self.ensure_not_busy()?;
        if self.state() != WorkflowState::Idle {
            return Err(WorkflowError::InvalidTransition);
        }
        let record = self.service.get(key).await?;
        let draft = ResidentDraft::from_record(&record, self.service.validator().genders());
        *self.lock_state() = WorkflowState::Editing {
            target: Some(*key),
            draft,
        };
        Ok(())
    }

    /// Open the read-only view with a snapshot of the record.
    pub async fn open_view(&self, key: &ResidentKey) -> Result<(), WorkflowError> {
        self.ensure_not_busy()?;
        if self.state() != WorkflowState::Idle {
            return Err(WorkflowError::InvalidTransition);
        }
        let record = self.service.get(key).await?;
        *self.lock_state() = WorkflowState::Viewing { record };
        Ok(())
    }

    /// Open the delete confirmation for the targeted record.
    pub fn request_delete(&self, key: &ResidentKey) -> Result<(), WorkflowError> {
        self.ensure_not_busy()?;
        let mut state = self.lock_state();
        if *state != WorkflowState::Idle {
            return Err(WorkflowError::InvalidTransition);
        }
        *state = WorkflowState::ConfirmingDelete { key: *key };
        Ok(())
    }

    /// Close the active modal without mutating the store.
    pub fn cancel(&self) -> Result<(), WorkflowError> {
        self.ensure_not_busy()?;
        let mut state = self.lock_state();
        if *state == WorkflowState::Idle {
            return Err(WorkflowError::InvalidTransition);
        }
        *state = WorkflowState::Idle;
        Ok(())
    }

    /// Submit the form draft: create when no target, update otherwise.
    ///
    /// On success the workflow returns to idle; on validation or conflict
    /// failure it stays in the form with the submitted draft so the user can
    /// correct and resubmit.
    pub async fn submit(&self, draft: ResidentDraft) -> Result<ResidentRecord, WorkflowError> {
        let target = match &*self.lock_state() {
            WorkflowState::Editing { target, .. } => *target,
            _ => return Err(WorkflowError::InvalidTransition),
        };
        let _guard = self.acquire_busy()?;

        let outcome = match &target {
            None => self.service.create(&draft).await,
            Some(key) => self.service.update(key, &draft).await,
        };

        match outcome {
            Ok(record) => {
                *self.lock_state() = WorkflowState::Idle;
                Ok(record)
            }
            Err(error) => {
                *self.lock_state() = WorkflowState::Editing { target, draft };
                Err(WorkflowError::Engine(error))
            }
        }
    }

    /// Confirm the pending deletion.
    ///
    /// On success the workflow returns to idle; on failure the confirmation
    /// stays open so the user can cancel.
    pub async fn confirm_delete(&self) -> Result<(), WorkflowError> {
        let key = match &*self.lock_state() {
            WorkflowState::ConfirmingDelete { key } => *key,
            _ => return Err(WorkflowError::InvalidTransition),
        };
        let _guard = self.acquire_busy()?;

        match self.service.delete(&key).await {
            Ok(()) => {
                *self.lock_state() = WorkflowState::Idle;
                Ok(())
            }
            Err(error) => Err(WorkflowError::Engine(error)),
        }
    }
}
