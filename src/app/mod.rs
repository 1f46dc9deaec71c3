//! Menu dispatch on top of the clock registry
//!
//! [`WorldClockApp`] plays the part of the clock's context menu: it keeps
//! track of which clock a command applies to, turns menu commands into
//! registry operations, and reports recoverable failures through the host.

use chrono::{DateTime, Utc};

use crate::commands::MenuCommand;
use worldclock_core::{
    ClockError, ClockHost, ClockId, ClockRegistry, Settings, SettingsError, SettingsStore,
};

pub const APP_NAME: &str = "World Clock";

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Done,
    /// Text to show at the prompt
    Text(String),
    Exit,
}

pub struct WorldClockApp<H: ClockHost> {
    registry: ClockRegistry<H>,
    store: SettingsStore,
    /// Clock picked by `select` or a click; commands fall back to the last clock
    selected: Option<ClockId>,
}

impl<H: ClockHost> WorldClockApp<H> {
    /// Build the registry from loaded settings
    pub fn new(host: H, settings: &Settings, store: SettingsStore) -> Result<Self, ClockError> {
        let metrics = worldclock_core::ClockMetrics::new(settings.show_seconds);
        let registry = ClockRegistry::new(host, settings.layout, metrics, &settings.clocks)?;
        Ok(Self {
            registry,
            store,
            selected: None,
        })
    }

    pub fn registry(&self) -> &ClockRegistry<H> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ClockRegistry<H> {
        &mut self.registry
    }

    /// Clock the next command applies to
    pub fn target(&self) -> ClockId {
        self.selected
            .filter(|id| self.registry.get(*id).is_some())
            .unwrap_or_else(|| self.registry.last_id())
    }

    /// Select the clock under a click in container coordinates
    pub fn select_at(&mut self, x: i32, y: i32) -> Option<ClockId> {
        let id = self.registry.clock_at(x, y)?;
        self.selected = Some(id);
        tracing::debug!(%id, x, y, "Clock selected by click");
        Some(id)
    }

    pub fn tick(&mut self) {
        self.registry.tick();
    }

    /// Run a command, reporting recoverable errors to the user.
    ///
    /// Only fatal errors are returned; the host has already been notified.
    pub fn handle(&mut self, command: MenuCommand) -> Result<Reply, ClockError> {
        match self.dispatch(command) {
            Ok(reply) => Ok(reply),
            Err(err) if err.is_fatal() => {
                tracing::error!(error = %err, "Fatal clock error");
                self.registry.host_mut().notify(APP_NAME, &err.to_string());
                Err(err)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Command rejected");
                self.registry.host_mut().notify(APP_NAME, &capitalize(&err.to_string()));
                Ok(Reply::Done)
            }
        }
    }

    fn dispatch(&mut self, command: MenuCommand) -> Result<Reply, ClockError> {
        tracing::debug!(?command, "Dispatching command");
        match command {
            MenuCommand::Add { label, offset } => {
                let id = self.registry.add_clock(&label, offset)?;
                self.registry.relayout(self.registry.layout());
                self.selected = Some(id);
            }
            MenuCommand::Modify { label, offset } => {
                let id = self.target();
                self.registry.modify_clock(id, &label, offset)?;
            }
            MenuCommand::Delete => {
                let id = self.target();
                self.registry.remove_clock(id)?;
                if self.selected == Some(id) {
                    self.selected = None;
                }
            }
            MenuCommand::ToggleOnTop => {
                let mut layout = self.registry.layout();
                layout.always_on_top = !layout.always_on_top;
                self.registry.relayout(layout);
            }
            MenuCommand::Corner(corner) => {
                let mut layout = self.registry.layout();
                layout.set_corner(corner);
                self.registry.relayout(layout);
            }
            MenuCommand::Orientation(orientation) => {
                let mut layout = self.registry.layout();
                layout.set_orientation(orientation);
                self.registry.relayout(layout);
            }
            MenuCommand::Save => {
                if let Err(err) = self.save() {
                    tracing::warn!(error = %err, "Saving settings failed");
                    self.registry
                        .host_mut()
                        .notify(APP_NAME, &format!("Could not save settings: {err}"));
                }
            }
            MenuCommand::About => {
                self.registry.host_mut().notify(APP_NAME, &about_text());
            }
            MenuCommand::Exit => return Ok(Reply::Exit),
            MenuCommand::List => return Ok(Reply::Text(self.list_at(Utc::now()))),
            MenuCommand::Select(position) => return Ok(Reply::Text(self.select(position))),
        }
        Ok(Reply::Done)
    }

    fn select(&mut self, position: usize) -> String {
        let Some(id) = position
            .checked_sub(1)
            .and_then(|index| self.registry.id_at(index))
        else {
            return format!(
                "No clock at position {position} (1 to {})",
                self.registry.len()
            );
        };
        self.selected = Some(id);
        match self.registry.get(id) {
            Some(clock) => format!("Selected {}", clock.label()),
            None => String::new(),
        }
    }

    /// Persist the current clocks and layout
    pub fn save(&self) -> Result<(), SettingsError> {
        self.store.store(&self.settings())
    }

    pub fn settings(&self) -> Settings {
        Settings {
            layout: self.registry.layout(),
            show_seconds: self.registry.metrics().show_seconds,
            clocks: self.registry.settings(),
        }
    }

    /// One line per clock in display order; the target is marked with `*`
    pub fn list_at(&self, now: DateTime<Utc>) -> String {
        let target = self.target();
        self.registry
            .clocks()
            .iter()
            .enumerate()
            .map(|(i, clock)| {
                let marker = if clock.id() == target { '*' } else { ' ' };
                format!(
                    "{marker} {:>2}  {:<31}  {:+03}  {}",
                    i + 1,
                    clock.label(),
                    clock.offset(),
                    clock.local_time(now)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Tear down every clock and return the host
    pub fn shutdown(self) -> H {
        self.registry.shutdown()
    }
}

pub fn about_text() -> String {
    format!("{APP_NAME} {}", env!("CARGO_PKG_VERSION"))
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
