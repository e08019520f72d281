use std::time::Duration;

use dirmirror_core::{Effect, Msg};
use dirmirror_engine::{EngineEvent, EngineHandle, JobId, MirrorRequest};
use mirror_logging::{mirror_info, mirror_warn};

/// Executes effects produced by `update` against the engine and turns engine
/// events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    next_job_id: JobId,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            next_job_id: 1,
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartMirror { source, target } => {
                    let job_id = self.next_job_id;
                    self.next_job_id += 1;
                    mirror_info!("StartMirror job_id={} source={} target={}", job_id, source, target);
                    self.engine.enqueue(MirrorRequest {
                        job_id,
                        source,
                        target,
                    });
                }
                Effect::Cancel => {
                    mirror_info!("Cancel requested");
                    self.engine.cancel();
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine event that maps to a message.
    /// Returns `Msg::Tick` when nothing relevant arrived in time.
    pub fn poll(&self, timeout: Duration) -> Msg {
        match self.engine.recv_timeout(timeout) {
            Some(event) => map_event(event).unwrap_or(Msg::NoOp),
            None => Msg::Tick,
        }
    }
}

pub fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::ScanStarted { .. } => Some(Msg::ScanStarted),
        EngineEvent::ScanCompleted { count } => Some(Msg::ScanCompleted { count }),
        EngineEvent::FileMirrored { .. } => Some(Msg::FileFinished { ok: true }),
        EngineEvent::FileSkipped { .. } => Some(Msg::FileFinished { ok: false }),
        EngineEvent::MirrorFinished { job_id, result } => Some(match result {
            Ok(result) => Msg::MirrorCompleted {
                ok: result.ok,
                skipped: result.skipped,
                total: result.total,
            },
            Err(err) => {
                mirror_warn!("Job {} failed: {}", job_id, err);
                Msg::MirrorFailed(err.failure_reason())
            }
        }),
        EngineEvent::DirectoryScanned { .. } | EngineEvent::MirrorCompleted(_) => None,
    }
}
