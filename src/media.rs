use crate::scene::PanelKind;
use bevy_ecs::prelude::Component;

/// Facts the loader reports once a texture or video stream is decodable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaInfo {
    pub aspect: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaStatus {
    Pending,
    Ready(MediaInfo),
    Failed,
}

/// Live decode pipeline owned by the media collaborator. `dispose` must make
/// the GPU/decoder resources reclaimable; the slot calls it on drop.
pub trait MediaPipeline: Send + Sync {
    fn play(&mut self);
    fn pause(&mut self);
    fn dispose(&mut self);
}

/// Per-panel media lifecycle. The panel's geometry and motion exist from
/// spawn and run against the placeholder aspect until readiness is signaled;
/// a failed load keeps the placeholder forever.
#[derive(Component)]
pub struct MediaSlot {
    status: MediaStatus,
    pipeline: Option<Box<dyn MediaPipeline>>,
    playing: bool,
}

impl MediaSlot {
    pub fn pending() -> Self {
        Self { status: MediaStatus::Pending, pipeline: None, playing: false }
    }

    pub fn with_pipeline(pipeline: Box<dyn MediaPipeline>) -> Self {
        Self { status: MediaStatus::Pending, pipeline: Some(pipeline), playing: false }
    }

    pub fn status(&self) -> MediaStatus {
        self.status
    }

    pub fn mark_ready(&mut self, info: MediaInfo) {
        self.status = MediaStatus::Ready(info);
    }

    pub fn mark_failed(&mut self) {
        self.status = MediaStatus::Failed;
    }

    pub fn aspect(&self, kind: PanelKind) -> f32 {
        match self.status {
            MediaStatus::Ready(info) => info.aspect,
            _ => placeholder_aspect(kind),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Playback follows selection; it only sticks once the stream is ready.
    pub fn set_playing(&mut self, playing: bool) {
        if playing && !matches!(self.status, MediaStatus::Ready(_)) {
            return;
        }
        if self.playing == playing {
            return;
        }
        self.playing = playing;
        if let Some(pipeline) = self.pipeline.as_mut() {
            if playing {
                pipeline.play();
            } else {
                pipeline.pause();
            }
        }
    }
}

impl Drop for MediaSlot {
    fn drop(&mut self) {
        if let Some(mut pipeline) = self.pipeline.take() {
            pipeline.dispose();
        }
    }
}

pub fn placeholder_aspect(kind: PanelKind) -> f32 {
    match kind {
        PanelKind::Video => 16.0 / 9.0,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct ProbePipeline {
        plays: Arc<AtomicUsize>,
        disposals: Arc<AtomicUsize>,
    }

    impl MediaPipeline for ProbePipeline {
        fn play(&mut self) {
            self.plays.fetch_add(1, Ordering::SeqCst);
        }
        fn pause(&mut self) {}
        fn dispose(&mut self) {
            self.disposals.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn playback_waits_for_readiness() {
        let plays = Arc::new(AtomicUsize::new(0));
        let disposals = Arc::new(AtomicUsize::new(0));
        let mut slot = MediaSlot::with_pipeline(Box::new(ProbePipeline {
            plays: plays.clone(),
            disposals: disposals.clone(),
        }));
        slot.set_playing(true);
        assert!(!slot.is_playing(), "pending media cannot play");
        slot.mark_ready(MediaInfo { aspect: 16.0 / 9.0 });
        slot.set_playing(true);
        assert!(slot.is_playing());
        assert_eq!(plays.load(Ordering::SeqCst), 1);
        drop(slot);
        assert_eq!(disposals.load(Ordering::SeqCst), 1, "drop disposes the pipeline");
    }

    #[test]
    fn failed_media_keeps_placeholder_aspect() {
        let mut slot = MediaSlot::pending();
        slot.mark_failed();
        assert_eq!(slot.aspect(PanelKind::Video), 16.0 / 9.0);
        assert_eq!(slot.aspect(PanelKind::Image), 1.0);
    }
}
