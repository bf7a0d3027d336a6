use crate::{
    models::{Content, Image, StylePreset},
    orchestrator::{Orchestrator, EMPTY_INSTRUCTION_MESSAGE, EMPTY_PROMPT_MESSAGE},
    service::GenerationService,
};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

pub const MISSING_IMAGE_MESSAGE: &str = "Generate an image before requesting an edit.";

/// Single-slot exclusivity guard for one kind of operation.
#[derive(Debug, Default)]
pub struct OperationGuard {
    busy: AtomicBool,
}

/// Proof that the slot is held; dropping it frees the slot.
#[derive(Debug)]
pub struct GuardTicket<'a> {
    guard: &'a OperationGuard,
}

impl OperationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn try_acquire(&self) -> Option<GuardTicket<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GuardTicket { guard: self })
    }
}

impl Drop for GuardTicket<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

/// Everything the view needs to render one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub prompt: String,
    pub edit_instruction: String,
    pub style: StylePreset,
    pub is_generating: bool,
    pub is_editing: bool,
    pub error: Option<String>,
    pub content: Option<Content>,
    pub image: Option<Image>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Results were stored.
    Completed,
    /// The error message was stored.
    Failed,
    /// The same operation is already in flight; nothing changed.
    Busy,
    /// A newer generation replaced the image this edit started from.
    Superseded,
}

#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    generation: u64,
}

/// Transient per-user state plus the event handlers that drive it.
///
/// State is only locked between awaits, never across a remote call.
pub struct Session<S: GenerationService> {
    orchestrator: Orchestrator<S>,
    inner: Mutex<Inner>,
    generating: OperationGuard,
    editing: OperationGuard,
}

impl<S: GenerationService> Session<S> {
    pub fn new(orchestrator: Orchestrator<S>) -> Self {
        Self {
            orchestrator,
            inner: Mutex::new(Inner::default()),
            generating: OperationGuard::new(),
            editing: OperationGuard::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> SessionState {
        let mut state = self.lock().state.clone();
        state.is_generating = self.generating.is_busy();
        state.is_editing = self.editing.is_busy();
        state
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        self.lock().state.prompt = prompt.into();
    }

    pub fn set_edit_instruction(&self, instruction: impl Into<String>) {
        self.lock().state.edit_instruction = instruction.into();
    }

    /// Only affects the next generation; displayed results stay.
    pub fn select_style(&self, style: StylePreset) {
        self.lock().state.style = style;
    }

    pub fn can_submit_generate(&self) -> bool {
        !self.generating.is_busy() && !self.lock().state.prompt.trim().is_empty()
    }

    pub fn can_submit_edit(&self) -> bool {
        if self.editing.is_busy() {
            return false;
        }
        let inner = self.lock();
        inner.state.image.is_some() && !inner.state.edit_instruction.trim().is_empty()
    }

    pub async fn submit_generate(&self) -> SubmitOutcome {
        let Some(_ticket) = self.generating.try_acquire() else {
            log::debug!("Generation already in flight, ignoring submit");
            return SubmitOutcome::Busy;
        };

        let (prompt, style) = {
            let mut inner = self.lock();
            if inner.state.prompt.trim().is_empty() {
                inner.state.error = Some(EMPTY_PROMPT_MESSAGE.to_string());
                return SubmitOutcome::Failed;
            }
            inner.generation += 1;
            inner.state.content = None;
            inner.state.image = None;
            inner.state.edit_instruction.clear();
            inner.state.error = None;
            (inner.state.prompt.clone(), inner.state.style)
        };

        let result = self.orchestrator.generate(&prompt, style).await;

        let mut inner = self.lock();
        match result {
            Ok((content, image)) => {
                inner.state.content = Some(content);
                inner.state.image = Some(image);
                SubmitOutcome::Completed
            }
            Err(e) => {
                inner.state.error = Some(e.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit_edit(&self) -> SubmitOutcome {
        let Some(_ticket) = self.editing.try_acquire() else {
            log::debug!("Edit already in flight, ignoring submit");
            return SubmitOutcome::Busy;
        };

        let (image, instruction, generation) = {
            let mut inner = self.lock();
            if inner.state.edit_instruction.trim().is_empty() {
                inner.state.error = Some(EMPTY_INSTRUCTION_MESSAGE.to_string());
                return SubmitOutcome::Failed;
            }
            let Some(image) = inner.state.image.clone() else {
                inner.state.error = Some(MISSING_IMAGE_MESSAGE.to_string());
                return SubmitOutcome::Failed;
            };
            inner.state.error = None;
            (image, inner.state.edit_instruction.clone(), inner.generation)
        };

        let result = self.orchestrator.edit_image(&image, &instruction).await;

        let mut inner = self.lock();
        if inner.generation != generation {
            log::warn!("Discarding edit result: a new generation started meanwhile");
            return SubmitOutcome::Superseded;
        }
        match result {
            Ok(edited) => {
                inner.state.image = Some(edited);
                SubmitOutcome::Completed
            }
            Err(e) => {
                inner.state.error = Some(e.to_string());
                SubmitOutcome::Failed
            }
        }
    }
}
