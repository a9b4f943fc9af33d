//! Voice acquisition and the cloned-voice lease.

use std::sync::{Arc, Mutex};
use storyreel_core::{VoiceChoice, VoiceSpec, preset_voice};
use storyreel_error::{
    StoryreelErrorKind, StoryreelResult, ValidationError, ValidationErrorKind,
    VoiceLifecycleError, VoiceLifecycleErrorKind,
};
use storyreel_interface::VoiceCloneService;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{Instrument, info, instrument, warn};

type Cleanup = Arc<Mutex<Vec<JoinHandle<()>>>>;

/// Hands out voices for a run.
pub struct VoiceResource {
    service: Arc<dyn VoiceCloneService>,
    cleanup: Cleanup,
}

impl VoiceResource {
    /// Resource backed by `service` for clones.
    pub fn new(service: Arc<dyn VoiceCloneService>) -> Self {
        Self {
            service,
            cleanup: Arc::default(),
        }
    }

    /// Wait for every clone deletion started so far, including those left
    /// running by dropped leases or cancelled releases.
    pub async fn settle(&self) {
        let tasks = std::mem::take(
            &mut *self
                .cleanup
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );
        for task in tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "Background voice deletion did not finish");
            }
        }
    }

    /// Resolve a preset or create a clone.
    ///
    /// A failed clone surfaces as a voice lifecycle error.
    #[instrument(skip_all)]
    pub async fn acquire(&self, choice: &VoiceChoice) -> StoryreelResult<VoiceLease> {
        match choice {
            VoiceChoice::Preset(name) => {
                let voice = preset_voice(name).ok_or_else(|| {
                    ValidationError::new(ValidationErrorKind::Voice(name.clone()))
                })?;
                info!(voice = voice.name, "Using preset voice");
                Ok(VoiceLease::preset(VoiceSpec::preset(voice)))
            }
            VoiceChoice::Clone { name, samples } => {
                let id = self.service.create(samples, name).await.map_err(|e| {
                    if matches!(e.kind(), StoryreelErrorKind::VoiceLifecycle(_)) {
                        e
                    } else {
                        VoiceLifecycleError::new(VoiceLifecycleErrorKind::CreateFailed(
                            e.to_string(),
                        ))
                        .into()
                    }
                })?;
                info!(voice_id = %id, "Cloned voice");
                let spec = VoiceSpec::cloned(id.clone(), samples.clone());
                Ok(VoiceLease::cloned(
                    spec,
                    id,
                    self.service.clone(),
                    self.cleanup.clone(),
                ))
            }
        }
    }
}

/// A voice held for one run.
///
/// A cloned voice is deleted exactly once: by [`release`](Self::release),
/// or, if the lease is dropped unreleased, by a task spawned from `Drop`.
pub struct VoiceLease {
    spec: VoiceSpec,
    service: Option<Arc<dyn VoiceCloneService>>,
    pending: Mutex<Option<String>>,
    cleanup: Cleanup,
}

impl VoiceLease {
    fn preset(spec: VoiceSpec) -> Self {
        Self {
            spec,
            service: None,
            pending: Mutex::new(None),
            cleanup: Arc::default(),
        }
    }

    fn cloned(
        spec: VoiceSpec,
        id: String,
        service: Arc<dyn VoiceCloneService>,
        cleanup: Cleanup,
    ) -> Self {
        Self {
            spec,
            service: Some(service),
            pending: Mutex::new(Some(id)),
            cleanup,
        }
    }

    /// The leased voice.
    pub fn spec(&self) -> &VoiceSpec {
        &self.spec
    }

    /// Backend voice id.
    pub fn voice_id(&self) -> &str {
        self.spec.voice_id()
    }

    fn take_pending(&self) -> Option<String> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    /// Delete a cloned voice. Later calls do nothing.
    ///
    /// The delete runs on its own task, so cancelling this future does not
    /// abort it; [`VoiceResource::settle`] waits for it. Delete failures are
    /// logged and swallowed.
    #[instrument(skip(self), fields(voice_id = self.voice_id()))]
    pub async fn release(&self) {
        let (Some(id), Some(service)) = (self.take_pending(), self.service.clone()) else {
            return;
        };
        let done = spawn_delete(&Handle::current(), service, id, &self.cleanup);
        let _ = done.await;
    }
}

fn spawn_delete(
    handle: &Handle,
    service: Arc<dyn VoiceCloneService>,
    id: String,
    cleanup: &Cleanup,
) -> oneshot::Receiver<()> {
    let (done_tx, done_rx) = oneshot::channel();
    let task = handle.spawn(
        async move {
            delete_logged(service.as_ref(), &id).await;
            let _ = done_tx.send(());
        }
        .in_current_span(),
    );
    let mut tasks = cleanup
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    tasks.retain(|task| !task.is_finished());
    tasks.push(task);
    done_rx
}

async fn delete_logged(service: &dyn VoiceCloneService, id: &str) {
    match service.delete(id).await {
        Ok(()) => info!(voice_id = %id, "Released cloned voice"),
        Err(e) => warn!(voice_id = %id, error = %e, "Failed to delete cloned voice"),
    }
}

impl Drop for VoiceLease {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        let (Some(id), Some(service)) = (pending, self.service.take()) else {
            return;
        };

        match Handle::try_current() {
            Ok(handle) => {
                warn!(voice_id = %id, "Voice lease dropped unreleased, deleting in background");
                spawn_delete(&handle, service, id, &self.cleanup);
            }
            Err(_) => {
                warn!(voice_id = %id, "No runtime to delete cloned voice, it will be leaked");
            }
        }
    }
}
