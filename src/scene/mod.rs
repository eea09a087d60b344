//! Scene progression for the guided greeting experience.
//!
//! One `Scene` is current at any time. Transitions run monotonically
//! forward along [`Scene::ORDER`]; `Reply` is terminal. The machine itself
//! performs no validation — each scene's UI only offers the next legal
//! scene as an action, and the Confirm scene's "No" button deliberately
//! requests no transition at all.

/// One full-screen step of the experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    Intro,
    Confirm,
    MusicPlay,
    LightOn,
    PhotoReveal,
    Decorate,
    Firework,
    Cake,
    Message,
    Reply,
    /// Renders the reply dialog like `Reply`, but no transition produces
    /// it. Kept until the missing Reply → Chat hand-off is confirmed dead.
    Chat,
}

impl Scene {
    /// The fixed forward order of the experience.
    pub const ORDER: [Scene; 10] = [
        Scene::Intro,
        Scene::Confirm,
        Scene::MusicPlay,
        Scene::LightOn,
        Scene::PhotoReveal,
        Scene::Decorate,
        Scene::Firework,
        Scene::Cake,
        Scene::Message,
        Scene::Reply,
    ];

    /// Scenes that offer no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Scene::Reply | Scene::Chat)
    }

    /// Early scenes render on the darkened backdrop with the heart rain.
    pub fn is_night(self) -> bool {
        matches!(self, Scene::Intro | Scene::Confirm | Scene::MusicPlay)
    }
}

/// A committed scene change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Scene,
    pub to: Scene,
}

/// Sole owner and mutator of the current scene value.
#[derive(Debug)]
pub struct SceneMachine {
    current: Scene,
}

impl SceneMachine {
    pub fn new() -> Self {
        Self {
            current: Scene::Intro,
        }
    }

    pub fn current(&self) -> Scene {
        self.current
    }

    /// Unconditionally set the current scene. Cannot fail; downstream side
    /// effects never roll a transition back.
    pub fn advance(&mut self, to: Scene) -> Transition {
        let from = self.current;
        self.current = to;
        Transition { from, to }
    }
}

impl Default for SceneMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_intro() {
        assert_eq!(SceneMachine::new().current(), Scene::Intro);
    }

    #[test]
    fn advance_reports_both_endpoints() {
        let mut machine = SceneMachine::new();
        let transition = machine.advance(Scene::Confirm);
        assert_eq!(transition.from, Scene::Intro);
        assert_eq!(transition.to, Scene::Confirm);
        assert_eq!(machine.current(), Scene::Confirm);
    }

    #[test]
    fn full_walk_follows_order() {
        let mut machine = SceneMachine::new();
        for window in Scene::ORDER.windows(2) {
            assert_eq!(machine.current(), window[0]);
            machine.advance(window[1]);
        }
        assert_eq!(machine.current(), Scene::Reply);
        assert!(machine.current().is_terminal());
    }

    #[test]
    fn chat_is_not_in_the_forward_order() {
        assert!(!Scene::ORDER.contains(&Scene::Chat));
        assert!(Scene::Chat.is_terminal());
    }
}
