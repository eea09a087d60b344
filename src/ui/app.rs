//! Main application: scene ownership, event loop, and side-effect
//! dispatch.
//!
//! The reducer path is deliberately split: key handling and the scene
//! machine only *decide*; committed transitions are mapped to [`Effect`]s
//! by a pure function and executed afterwards, so no side effect can run
//! against an uncommitted state.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, style::Style, Frame, Terminal};
use tokio::sync::mpsc;

use crate::audio::MusicPlayer;
use crate::config::Config;
use crate::overlay::OverlayEffects;
use crate::reply::{HttpTransport, ReplyGateway, ReplyStore, SubmitOutcome};
use crate::scene::{Scene, SceneMachine};
use crate::timeline::TextSequencer;
use crate::ui::components::{
    CakeScene, ConfirmPrompt, DecorateView, FireworkStage, HeartRain, InstructionBar, IntroView,
    MessageView, PhotoReveal, PulsePrompt, ReplyDialog, ReplyPhase,
};
use crate::ui::effect::{effects_for_transition, Effect};
use crate::ui::events::AppEvent;
use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::theme;

/// Frame cadence for animations and timer checks.
const FRAME: Duration = Duration::from_millis(50);
/// Delay between a successful submission and closing the session.
const CLOSE_DELAY: Duration = Duration::from_millis(1500);
/// Hearts in the opening backdrop.
const HEART_COUNT: usize = 20;

/// Per-scene UI state. Replacing the variant drops the old scene's local
/// state — and with it every pending scene-owned timer.
enum SceneUi {
    Intro(TextSequencer),
    Confirm(ConfirmPrompt),
    MusicPlay(PulsePrompt),
    LightOn(PulsePrompt),
    PhotoReveal(PhotoReveal),
    Decorate(DecorateView),
    Firework(FireworkStage),
    Cake(CakeScene),
    Message(MessageView),
    Reply(ReplyDialog),
}

impl SceneUi {
    fn for_scene(scene: Scene, config: &Config, now: Instant) -> Self {
        match scene {
            Scene::Intro => SceneUi::Intro(TextSequencer::new(config.intro_steps(), now)),
            Scene::Confirm => SceneUi::Confirm(ConfirmPrompt::new()),
            Scene::MusicPlay => SceneUi::MusicPlay(PulsePrompt::new(now)),
            Scene::LightOn => SceneUi::LightOn(PulsePrompt::new(now)),
            Scene::PhotoReveal => SceneUi::PhotoReveal(PhotoReveal::new(now)),
            Scene::Decorate => SceneUi::Decorate(DecorateView::new(now)),
            Scene::Firework => SceneUi::Firework(FireworkStage::new(now)),
            Scene::Cake => SceneUi::Cake(CakeScene::new()),
            Scene::Message => SceneUi::Message(MessageView::new()),
            // Chat is produced by no transition, but if it ever becomes
            // current it renders the reply dialog, matching the original
            // rendering condition.
            Scene::Reply | Scene::Chat => SceneUi::Reply(ReplyDialog::new()),
        }
    }
}

pub struct App {
    config: Config,
    machine: SceneMachine,
    scene_ui: SceneUi,
    overlay: OverlayEffects,
    hearts: HeartRain,
    music: MusicPlayer,
    gateway: Arc<ReplyGateway<HttpTransport>>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = ReplyStore::open(&crate::util::paths::database_path())?;
        Self::with_store(config, store)
    }

    /// Build against a specific store (tests use an in-memory one).
    pub fn with_store(config: Config, store: ReplyStore) -> anyhow::Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        // The gateway's acknowledgment callback feeds back into the app
        // channel, exactly once per successful delivery.
        let ack_tx = event_tx.clone();
        let gateway = Arc::new(
            ReplyGateway::new(HttpTransport::new(config.endpoint_url.clone()), store).with_ack(
                move |text| {
                    let _ = ack_tx.send(AppEvent::ReplyAccepted(text.to_string()));
                },
            ),
        );

        let now = Instant::now();
        Ok(Self {
            machine: SceneMachine::new(),
            scene_ui: SceneUi::for_scene(Scene::Intro, &config, now),
            overlay: OverlayEffects::new(),
            hearts: HeartRain::new(HEART_COUNT, now),
            music: MusicPlayer::new(config.music_path.clone()),
            gateway,
            event_tx,
            event_rx,
            should_quit: false,
            config,
        })
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let mut guard = TerminalGuard::new();

        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        guard.cleanup()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                _ = tokio::time::sleep(FRAME) => {
                    while event::poll(Duration::from_millis(0))? {
                        if let Event::Key(key) = event::read()? {
                            if key.kind != KeyEventKind::Release {
                                self.handle_key(key, Instant::now());
                            }
                        }
                    }
                    self.tick(Instant::now());
                }

                Some(event) = self.event_rx.recv() => {
                    self.handle_app_event(event);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        // Decide first, commit after: the match only records what should
        // happen so the borrow of the scene UI ends before any dispatch.
        let mut next: Option<Scene> = None;
        let mut submit: Option<String> = None;
        let mut sliced = false;

        match &mut self.scene_ui {
            // The intro runs on its own clock; no skipping.
            SceneUi::Intro(_) => {}

            SceneUi::Confirm(prompt) => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                    prompt.toggle();
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if prompt.activate() {
                        next = Some(Scene::MusicPlay);
                    }
                }
                KeyCode::Char('y') => next = Some(Scene::MusicPlay),
                _ => {}
            },

            SceneUi::MusicPlay(_) => {
                if is_activate(key.code) {
                    next = Some(Scene::LightOn);
                }
            }
            SceneUi::LightOn(_) => {
                if is_activate(key.code) {
                    next = Some(Scene::PhotoReveal);
                }
            }
            SceneUi::PhotoReveal(_) => {
                if is_activate(key.code) {
                    next = Some(Scene::Decorate);
                }
            }
            SceneUi::Decorate(_) => {
                if is_activate(key.code) {
                    next = Some(Scene::Firework);
                }
            }
            SceneUi::Firework(_) => {
                if is_activate(key.code) {
                    next = Some(Scene::Cake);
                }
            }

            SceneUi::Cake(cake) => {
                if is_activate(key.code) {
                    if cake.cut(now) {
                        sliced = true;
                    } else {
                        next = Some(Scene::Message);
                    }
                }
            }

            SceneUi::Message(view) => match key.code {
                KeyCode::Up => view.scroll_up(),
                KeyCode::Down => view.scroll_down(),
                KeyCode::Enter | KeyCode::Char('r') => next = Some(Scene::Reply),
                _ => {}
            },

            SceneUi::Reply(dialog) => match dialog.phase().clone() {
                ReplyPhase::Editing => match key.code {
                    KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                        dialog.insert_newline();
                    }
                    KeyCode::Enter => {
                        if dialog.can_send() {
                            submit = Some(dialog.begin_sending());
                        }
                    }
                    KeyCode::Backspace => dialog.backspace(),
                    KeyCode::Char(c) => dialog.insert_char(c),
                    _ => {}
                },
                ReplyPhase::Sending | ReplyPhase::Submitted => {}
                ReplyPhase::Failed(_) => {
                    if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                        dialog.dismiss_failure();
                    }
                }
            },
        }

        if sliced {
            self.overlay.slice_sparks(now, 0.5, 0.55);
        }
        if let Some(text) = submit {
            self.run_effect(Effect::SubmitReply { text }, now);
        }
        if let Some(scene) = next {
            self.request_scene(scene, now);
        }
    }

    /// Commit a transition, rebuild the scene UI (dropping the old
    /// scene's state and timers), then dispatch the attached effects.
    fn request_scene(&mut self, to: Scene, now: Instant) {
        let transition = self.machine.advance(to);
        self.scene_ui = SceneUi::for_scene(to, &self.config, now);
        for effect in effects_for_transition(&transition) {
            self.run_effect(effect, now);
        }
    }

    fn run_effect(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::StartMusic => self.music.start(),
            Effect::ConfettiBurst => self.overlay.confetti_burst(now),
            Effect::StartFireworksShow => self.overlay.start_show(now),
            Effect::FirecrackerBurst => self.overlay.start_firecracker_burst(now),
            Effect::StopFireworksShow => self.overlay.cancel_show(),
            Effect::SubmitReply { text } => {
                let gateway = self.gateway.clone();
                let tx = self.event_tx.clone();
                tokio::spawn(async move {
                    match gateway.submit(&text).await {
                        // The ack callback already queued ReplyAccepted.
                        Ok(SubmitOutcome::Sent) => {}
                        Ok(SubmitOutcome::Rejected) => {
                            tracing::debug!("empty reply rejected before dispatch");
                        }
                        Err(e) => {
                            let _ = tx.send(AppEvent::ReplyFailed(e.to_string()));
                        }
                    }
                });
            }
        }
    }

    fn tick(&mut self, now: Instant) {
        self.overlay.update(now);
        let intro_done = match &mut self.scene_ui {
            SceneUi::Intro(sequencer) => sequencer.update(now),
            SceneUi::Reply(dialog) => {
                dialog.tick();
                false
            }
            _ => false,
        };
        if intro_done {
            self.request_scene(Scene::Confirm, now);
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ReplyAccepted(text) => {
                tracing::info!(chars = text.chars().count(), "reply delivered");
                if let SceneUi::Reply(dialog) = &mut self.scene_ui {
                    dialog.mark_submitted();
                }
                let tx = self.event_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(CLOSE_DELAY).await;
                    let _ = tx.send(AppEvent::Quit);
                });
            }
            AppEvent::ReplyFailed(message) => {
                tracing::warn!(error = %message, "reply delivery failed");
                if let SceneUi::Reply(dialog) = &mut self.scene_ui {
                    dialog.mark_failed(message);
                }
            }
            AppEvent::Quit => self.should_quit = true,
        }
    }

    fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        let now = Instant::now();
        let scene = self.machine.current();
        let buf = f.buffer_mut();

        let bg = if scene.is_night() {
            theme::night()
        } else {
            theme::dawn()
        };
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_bg(bg);
            }
        }

        if scene.is_night() {
            self.hearts.render(now, area, buf);
        } else if area.width > 12 && area.height > 6 {
            let dim = Style::default().fg(theme::heart_dim());
            buf.set_string(area.x + 4, area.y + 1, "💕", dim);
            buf.set_string(area.x + area.width - 7, area.y + 2, "✨", dim);
            buf.set_string(area.x + 6, area.y + area.height - 2, "🌸", dim);
            buf.set_string(area.x + area.width - 9, area.y + area.height - 3, "💝", dim);
        }

        // Reserve the bottom line for key hints.
        let body = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };

        match &self.scene_ui {
            SceneUi::Intro(sequencer) => IntroView::render(sequencer.current_text(), body, buf),
            SceneUi::Confirm(prompt) => prompt.render(&self.config.question, body, buf),
            SceneUi::MusicPlay(prompt) => {
                prompt.render(now, "Play Music 🎵", "♫", theme::rose(), body, buf)
            }
            SceneUi::LightOn(prompt) => {
                prompt.render(now, "Light On 💡", "☀", theme::gold(), body, buf)
            }
            SceneUi::PhotoReveal(reveal) => {
                reveal.render(now, &self.config.recipient, body, buf)
            }
            SceneUi::Decorate(view) => view.render(now, &self.config.recipient, body, buf),
            SceneUi::Firework(stage) => stage.render(now, body, buf),
            SceneUi::Cake(cake) => cake.render(now, body, buf),
            SceneUi::Message(view) => {
                view.render(&self.config.recipient, &self.config.letter, body, buf)
            }
            SceneUi::Reply(dialog) => dialog.render(body, buf),
        }

        self.overlay.render(body, buf);

        InstructionBar::new(self.footer_hints()).render(
            Rect {
                x: area.x,
                y: area.y + area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            },
            buf,
        );
    }

    fn footer_hints(&self) -> Vec<(&'static str, &'static str)> {
        let quit = ("Ctrl+Q", "Quit");
        match &self.scene_ui {
            SceneUi::Intro(_) => vec![quit],
            SceneUi::Confirm(_) => vec![("←/→", "Choose"), ("Enter", "Pick"), quit],
            SceneUi::MusicPlay(_) => vec![("Enter", "Play the song"), quit],
            SceneUi::LightOn(_) => vec![("Enter", "Lights on"), quit],
            SceneUi::PhotoReveal(_) => vec![("Enter", "Decorate 🦋"), quit],
            SceneUi::Decorate(_) => vec![("Enter", "Fly the firecracker"), quit],
            SceneUi::Firework(_) => vec![("Enter", "Let's cut the cake 🎂"), quit],
            SceneUi::Cake(cake) => {
                if cake.is_cut() {
                    vec![("Enter", "I have a message for you ❤"), quit]
                } else {
                    vec![("Enter", "Cut the cake"), quit]
                }
            }
            SceneUi::Message(_) => vec![("↑/↓", "Scroll"), ("Enter", "Reply 💕"), quit],
            SceneUi::Reply(_) => vec![quit],
        }
    }
}

fn is_activate(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Char(' '))
}
