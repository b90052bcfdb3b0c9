use bevy_ecs::prelude::Component;

pub const EXTERNAL_TARGET: &str = "external";

/// Host-platform navigation. Fire-and-forget: the engine never observes a
/// result.
pub trait Navigator {
    fn open(&mut self, url: &str, target: &str);
}

/// Two-state confirmation gate shared by action buttons and paper
/// open/verify actions: releasing a press arms the prompt instead of
/// navigating, and only an explicit yes fires the link.
#[derive(Component, Clone, Debug)]
pub struct ConfirmGate {
    link: String,
    prompt: String,
    confirming: bool,
}

impl ConfirmGate {
    pub fn new(link: impl Into<String>) -> Self {
        let link = link.into();
        let prompt = format!("Redirecting to:\n{link}\nProceed?");
        Self { link, prompt, confirming: false }
    }

    pub fn with_prompt(link: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self { link: link.into(), prompt: prompt.into(), confirming: false }
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// Returns true when the gate moved from idle to confirming.
    pub fn arm(&mut self) -> bool {
        let was_idle = !self.confirming;
        self.confirming = true;
        was_idle
    }

    /// Fires the navigation exactly once, and only from the confirming state.
    pub fn confirm_yes(&mut self, navigator: &mut dyn Navigator) -> bool {
        if !self.confirming {
            return false;
        }
        self.confirming = false;
        navigator.open(&self.link, EXTERNAL_TARGET);
        true
    }

    pub fn confirm_no(&mut self) -> bool {
        let was = self.confirming;
        self.confirming = false;
        was
    }
}
