//! The tabbed application shell.
//!
//! Owns everything that outlives a single visit to the pomodoro tab: the
//! session counter, the "don't show again" preference, the sign-in form
//! and the fetch channel. The timer controller only exists while the
//! pomodoro tab is showing.

use std::sync::Arc;

use clap::ValueEnum;
use pomodoro_core::events::Event;
use pomodoro_core::{
    ActivationId, Config, ContentClient, ContentUpdate, Phase, SessionContext, TimerController,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::views;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    Pomodoro,
    #[value(name = "signin", alias = "sign-in")]
    SignIn,
    Help,
    Stats,
}

impl Tab {
    pub const BAR: [Tab; 4] = [Tab::Pomodoro, Tab::SignIn, Tab::Help, Tab::Stats];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Pomodoro => "pomodoro",
            Tab::SignIn => "sign in",
            Tab::Help => "help",
            Tab::Stats => "stats",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pomodoro" | "timer" => Some(Tab::Pomodoro),
            "signin" | "sign-in" | "sign_in" => Some(Tab::SignIn),
            "help" => Some(Tab::Help),
            "stats" => Some(Tab::Stats),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SwitchTab(Tab),
    Start,
    Pause,
    Reset,
    Confirm,
    Cancel,
    ToggleSkip,
    SetTime(String),
    Login { username: String, password: String },
    CreateAccount,
    Show,
    Commands,
    Quit,
}

pub fn parse_action(line: &str) -> Result<Action, String> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(Action::Show);
    };

    let action = match cmd.to_ascii_lowercase().as_str() {
        "start" | "play" => Action::Start,
        "pause" => Action::Pause,
        "reset" => Action::Reset,
        "yes" | "y" => Action::Confirm,
        "no" | "n" => Action::Cancel,
        "skip" => Action::ToggleSkip,
        "set" => Action::SetTime(words.collect::<Vec<_>>().join(" ")),
        "tab" => {
            let name = words.next().ok_or("usage: tab <pomodoro|signin|help|stats>")?;
            Action::SwitchTab(Tab::from_name(name).ok_or_else(|| format!("no such tab: {name}"))?)
        }
        "login" => Action::Login {
            username: words.next().unwrap_or_default().to_string(),
            password: words.next().unwrap_or_default().to_string(),
        },
        "create-account" => Action::CreateAccount,
        "show" => Action::Show,
        "commands" | "?" => Action::Commands,
        "quit" | "exit" | "q" => Action::Quit,
        other => match Tab::from_name(other) {
            Some(tab) => Action::SwitchTab(tab),
            None => return Err(format!("unknown command: {other} (type `commands`)")),
        },
    };
    Ok(action)
}

/// Result of handling one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Keep going, optionally with a message for the user.
    Continue(Option<String>),
    Quit,
}

pub struct Shell {
    config: Config,
    client: ContentClient,
    sessions: Arc<SessionContext>,
    content_tx: UnboundedSender<ContentUpdate>,
    skip_reset_confirmation: bool,
    next_activation: ActivationId,
    tab: Tab,
    pomodoro: Option<TimerController>,
    sign_in: SignInForm,
}

impl Shell {
    /// Must be called inside a tokio runtime: opening on the pomodoro tab
    /// issues the content fetches right away.
    pub fn new(
        config: Config,
        client: ContentClient,
        sessions: Arc<SessionContext>,
        content_tx: UnboundedSender<ContentUpdate>,
        tab: Tab,
    ) -> Self {
        let skip_reset_confirmation = config.timer.skip_reset_confirmation;
        let mut shell = Self {
            config,
            client,
            sessions,
            content_tx,
            skip_reset_confirmation,
            next_activation: ActivationId::first(),
            tab,
            pomodoro: None,
            sign_in: SignInForm::default(),
        };
        if tab == Tab::Pomodoro {
            shell.activate_pomodoro();
        }
        shell
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn pomodoro(&self) -> Option<&TimerController> {
        self.pomodoro.as_ref()
    }

    pub fn skip_reset_confirmation(&self) -> bool {
        self.pomodoro
            .as_ref()
            .map(|ctl| ctl.engine().skip_reset_confirmation())
            .unwrap_or(self.skip_reset_confirmation)
    }

    pub fn render(&self) -> String {
        let body = match (self.tab, self.pomodoro.as_ref()) {
            (Tab::Pomodoro, Some(ctl)) => views::pomodoro(ctl),
            (Tab::Pomodoro, None) => String::new(),
            (Tab::SignIn, _) => views::sign_in(&self.sign_in),
            (Tab::Help, _) => views::help(),
            (Tab::Stats, _) => views::stats(self.sessions.total_sessions()),
        };
        format!("{}\n\n{body}", views::tab_bar(self.tab))
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        if self.tab == Tab::Pomodoro {
            self.deactivate_pomodoro();
        }
        self.tab = tab;
        if tab == Tab::Pomodoro {
            self.activate_pomodoro();
        }
    }

    pub fn handle(&mut self, action: Action) -> Flow {
        let message = match action {
            Action::SwitchTab(tab) => {
                self.switch_tab(tab);
                None
            }
            Action::Start => self.with_pomodoro(|ctl| match ctl.start() {
                Some(_) => None,
                None if ctl.engine().is_running() => Some("timer is already running".into()),
                None => Some("nothing left on the clock: reset or set a time".into()),
            }),
            Action::Pause => self.with_pomodoro(|ctl| match ctl.pause() {
                Some(_) => None,
                None => Some("timer is not running".into()),
            }),
            Action::Reset => self.with_pomodoro(|ctl| match ctl.request_reset() {
                Some(Event::TimerReset { .. }) => Some("timer reset".into()),
                _ => None,
            }),
            Action::Confirm => self.with_pomodoro(|ctl| match ctl.reset_confirmation() {
                Some(overlay) => overlay.confirm().map(|_| "timer reset".into()),
                None => Some("no reset pending".into()),
            }),
            Action::Cancel => self.with_pomodoro(|ctl| match ctl.reset_confirmation() {
                Some(overlay) => {
                    overlay.cancel();
                    None
                }
                None => Some("no reset pending".into()),
            }),
            Action::ToggleSkip => self.with_pomodoro(|ctl| match ctl.reset_confirmation() {
                Some(mut overlay) => {
                    let skip = !overlay.skip_future();
                    overlay.set_skip_future(skip);
                    None
                }
                None => Some("no reset pending".into()),
            }),
            Action::SetTime(text) => self.with_pomodoro(|ctl| {
                if !ctl.engine().is_editable() {
                    return Some("pause the timer before editing".into());
                }
                ctl.submit_time(&text);
                None
            }),
            Action::Login { username, password } => {
                tracing::info!(%username, "sign-in requested");
                let message = format!("Logging in with {username}");
                self.sign_in = SignInForm { username, password };
                Some(message)
            }
            Action::CreateAccount => Some("Create account tapped".into()),
            Action::Show => None,
            Action::Commands => Some(views::COMMANDS.into()),
            Action::Quit => return Flow::Quit,
        };
        Flow::Continue(message)
    }

    /// Advance the countdown. Returns the line to print, if any.
    pub fn on_tick(&mut self) -> Option<String> {
        let ctl = self.pomodoro.as_mut()?;
        let event = ctl.tick()?;
        let line = views::clock(ctl);
        match event {
            Event::TimerExpired { .. } => Some(format!(
                "{line}\n  sessions completed: {}",
                self.sessions.total_sessions()
            )),
            _ => Some(line),
        }
    }

    /// Apply a fetched text. Returns true if the view changed.
    pub fn on_content(&mut self, update: ContentUpdate) -> bool {
        match self.pomodoro.as_mut() {
            Some(ctl) => ctl.apply_content(update),
            None => {
                tracing::debug!(
                    activation = ?update.activation,
                    "no pomodoro view, dropping content"
                );
                false
            }
        }
    }

    /// Resolves when the active countdown ticks. Pends while there is none.
    pub async fn next_tick(&mut self) {
        match self.pomodoro.as_mut() {
            Some(ctl) => ctl.next_tick().await,
            None => std::future::pending::<()>().await,
        }
    }

    fn with_pomodoro(
        &mut self,
        f: impl FnOnce(&mut TimerController) -> Option<String>,
    ) -> Option<String> {
        match self.pomodoro.as_mut() {
            Some(ctl) => f(ctl),
            None => Some("switch to the pomodoro tab first".into()),
        }
    }

    fn activate_pomodoro(&mut self) {
        let mut engine = self.config.engine();
        engine.set_skip_reset_confirmation(self.skip_reset_confirmation);

        let activation = self.next_activation;
        self.next_activation = activation.next();

        let ctl = TimerController::new(engine, self.sessions.clone(), activation);
        ctl.request_content(&self.client, &self.content_tx);
        tracing::debug!(?activation, "pomodoro view activated");
        self.pomodoro = Some(ctl);
    }

    fn deactivate_pomodoro(&mut self) {
        if let Some(ctl) = self.pomodoro.take() {
            self.skip_reset_confirmation = ctl.engine().skip_reset_confirmation();
            if ctl.engine().phase() == Phase::Running {
                tracing::info!(
                    remaining = ctl.engine().remaining_secs(),
                    "discarding running timer"
                );
            }
            tracing::debug!(activation = ?ctl.activation(), "pomodoro view closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomodoro_core::content::ContentField;
    use pomodoro_core::storage::EndpointsConfig;
    use tokio::sync::mpsc;

    fn shell(tab: Tab) -> (Shell, mpsc::UnboundedReceiver<ContentUpdate>) {
        let config = Config {
            endpoints: EndpointsConfig {
                quote_url: "http://127.0.0.1:1/api/quote".into(),
                date_url: "http://127.0.0.1:1/date".into(),
            },
            ..Config::default()
        };
        let client = config.content_client().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        let shell = Shell::new(config, client, Arc::new(SessionContext::new()), tx, tab);
        (shell, rx)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_action("start"), Ok(Action::Start));
        assert_eq!(parse_action("  "), Ok(Action::Show));
        assert_eq!(parse_action("set 10:00"), Ok(Action::SetTime("10:00".into())));
        assert_eq!(parse_action("tab stats"), Ok(Action::SwitchTab(Tab::Stats)));
        assert_eq!(parse_action("signin"), Ok(Action::SwitchTab(Tab::SignIn)));
        assert_eq!(
            parse_action("login ada secret"),
            Ok(Action::Login {
                username: "ada".into(),
                password: "secret".into()
            })
        );
        assert!(parse_action("dance").is_err());
        assert!(parse_action("tab nowhere").is_err());
    }

    #[tokio::test]
    async fn timer_commands_need_pomodoro_tab() {
        let (mut shell, _rx) = shell(Tab::Help);
        assert!(shell.pomodoro().is_none());
        assert_eq!(
            shell.handle(Action::Start),
            Flow::Continue(Some("switch to the pomodoro tab first".into()))
        );
    }

    #[tokio::test]
    async fn reset_prompt_round_trip() {
        let (mut shell, _rx) = shell(Tab::Pomodoro);
        shell.handle(Action::SetTime("00:30".into()));
        shell.handle(Action::Pause);
        shell.handle(Action::Reset);
        assert!(shell.render().contains("reset the timer?"));

        shell.handle(Action::ToggleSkip);
        assert!(shell.skip_reset_confirmation());
        assert_eq!(shell.handle(Action::Confirm), Flow::Continue(Some("timer reset".into())));

        let engine = shell.pomodoro().unwrap().engine();
        assert_eq!(engine.remaining_secs(), 1500);
        assert!(!engine.pending_reset_confirmation());
    }

    #[tokio::test]
    async fn second_reset_after_skip_closes_prompt() {
        let (mut shell, _rx) = shell(Tab::Pomodoro);
        shell.handle(Action::SetTime("10:00".into()));
        shell.handle(Action::Pause);
        shell.handle(Action::Reset);
        shell.handle(Action::ToggleSkip);

        assert_eq!(shell.handle(Action::Reset), Flow::Continue(Some("timer reset".into())));
        assert!(!shell.render().contains("reset the timer?"));
        let engine = shell.pomodoro().unwrap().engine();
        assert_eq!(engine.remaining_secs(), 1500);
        assert!(!engine.pending_reset_confirmation());
    }

    #[tokio::test]
    async fn tab_switch_discards_timer_but_keeps_preference() {
        let (mut shell, _rx) = shell(Tab::Pomodoro);
        let first = shell.pomodoro().unwrap().activation();
        shell.handle(Action::Reset);
        shell.handle(Action::ToggleSkip);
        shell.handle(Action::Cancel);
        shell.handle(Action::SetTime("00:10".into()));

        shell.switch_tab(Tab::Stats);
        assert!(shell.pomodoro().is_none());
        shell.switch_tab(Tab::Pomodoro);

        let ctl = shell.pomodoro().unwrap();
        assert_ne!(ctl.activation(), first);
        assert_eq!(ctl.engine().remaining_secs(), 1500);
        assert!(!ctl.is_ticking());
        assert!(ctl.engine().skip_reset_confirmation());
    }

    #[tokio::test]
    async fn stale_content_not_applied_after_reactivation() {
        let (mut shell, _rx) = shell(Tab::Pomodoro);
        let first = shell.pomodoro().unwrap().activation();
        shell.switch_tab(Tab::Help);
        shell.switch_tab(Tab::Pomodoro);

        let late = ContentUpdate {
            activation: first,
            field: ContentField::Quote("late".into()),
        };
        assert!(!shell.on_content(late));
        assert!(shell.pomodoro().unwrap().content().quote.is_empty());
    }

    #[tokio::test]
    async fn expiry_counts_a_session() {
        let (mut shell, _rx) = shell(Tab::Pomodoro);
        shell.handle(Action::SetTime("00:01".into()));
        let line = shell.on_tick().unwrap();
        assert!(line.contains("sessions completed: 1"));
        assert!(shell.on_tick().is_none());

        shell.switch_tab(Tab::Stats);
        assert!(shell.render().contains("sessions completed: 1"));
    }

    #[test]
    fn login_echoes_username() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let config = Config::default();
        let client = config.content_client().unwrap();
        let sessions = Arc::new(SessionContext::new());
        let mut shell = Shell::new(config, client, sessions, tx, Tab::SignIn);
        assert_eq!(
            shell.handle(Action::Login {
                username: "justin".into(),
                password: "pw".into()
            }),
            Flow::Continue(Some("Logging in with justin".into()))
        );
        assert_eq!(
            shell.handle(Action::CreateAccount),
            Flow::Continue(Some("Create account tapped".into()))
        );
    }
}
