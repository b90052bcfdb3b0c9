use bevy_ecs::prelude::Entity;
use std::fmt;

#[derive(Debug, Clone)]
pub enum ExhibitEvent {
    SelectionChanged { previous: Option<String>, current: Option<String> },
    PointerLockChanged { locked: bool },
    HoverStarted { entity: Entity },
    HoverEnded { entity: Entity },
    ConfirmArmed { entity: Entity },
    ConfirmDismissed { entity: Entity },
    NavigationRequested { url: String },
    MediaReady { id: String },
    MediaFailed { id: String },
}

impl fmt::Display for ExhibitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExhibitEvent::SelectionChanged { previous, current } => {
                write!(
                    f,
                    "SelectionChanged previous={} current={}",
                    previous.as_deref().unwrap_or("none"),
                    current.as_deref().unwrap_or("none")
                )
            }
            ExhibitEvent::PointerLockChanged { locked } => {
                write!(f, "PointerLockChanged locked={locked}")
            }
            ExhibitEvent::HoverStarted { entity } => write!(f, "HoverStarted entity={}", entity.index()),
            ExhibitEvent::HoverEnded { entity } => write!(f, "HoverEnded entity={}", entity.index()),
            ExhibitEvent::ConfirmArmed { entity } => write!(f, "ConfirmArmed entity={}", entity.index()),
            ExhibitEvent::ConfirmDismissed { entity } => {
                write!(f, "ConfirmDismissed entity={}", entity.index())
            }
            ExhibitEvent::NavigationRequested { url } => write!(f, "NavigationRequested url={url}"),
            ExhibitEvent::MediaReady { id } => write!(f, "MediaReady id={id}"),
            ExhibitEvent::MediaFailed { id } => write!(f, "MediaFailed id={id}"),
        }
    }
}

#[derive(Default)]
pub struct EventBus {
    events: Vec<ExhibitEvent>,
}

impl EventBus {
    pub fn push(&mut self, event: ExhibitEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<ExhibitEvent> {
        self.events.drain(..).collect()
    }
}
