//! Public entry point for external collaborators.
//!
//! [`DesktopController`] owns the desktop state, runs every command through
//! [`reduce_desktop`], hands the resulting effects to the injected [`PresentationAdapter`], and
//! keeps deferred visual effects in a named [`Scheduler`] driven by [`DesktopController::tick`].
//! Rejected commands are logged and otherwise ignored.

use leptos::logging;

use crate::{
    catalog::{BuiltinTemplates, WindowTemplateSource},
    config::DesktopConfig,
    effects::{RenderInstruction, RuntimeEffect, Transition},
    model::{WindowId, WindowRect},
    presentation::PresentationAdapter,
    reducer::{reduce_desktop, DesktopCommand, DesktopState},
    scheduler::Scheduler,
    shortcuts::{map_key_event, KeyChord, KeyPhase},
    switcher::CycleDirection,
};

pub struct DesktopController<P, T = BuiltinTemplates> {
    state: DesktopState,
    config: DesktopConfig,
    templates: T,
    presentation: P,
    scheduler: Scheduler<RuntimeEffect>,
    now_ms: u64,
}

impl<P: PresentationAdapter> DesktopController<P> {
    /// Builds a controller over the built-in portfolio catalog.
    pub fn with_builtin_templates(config: DesktopConfig, presentation: P) -> Self {
        Self::new(config, BuiltinTemplates, presentation)
    }
}

impl<P, T> DesktopController<P, T>
where
    P: PresentationAdapter,
    T: WindowTemplateSource,
{
    pub fn new(config: DesktopConfig, templates: T, presentation: P) -> Self {
        Self {
            state: DesktopState::new(&config),
            config,
            templates,
            presentation,
            scheduler: Scheduler::default(),
            now_ms: 0,
        }
    }

    /// Applies `command`. Returns `false` when the command's preconditions were not met.
    pub fn dispatch(&mut self, command: DesktopCommand) -> bool {
        match reduce_desktop(&mut self.state, &self.config, &self.templates, command) {
            Ok(transition) => {
                self.run_transition(transition);
                true
            }
            Err(err) => {
                logging::warn!("desktop command ignored: {err}");
                false
            }
        }
    }

    fn run_transition(&mut self, transition: Transition) {
        let Transition {
            effects,
            deferred,
            cancelled,
        } = transition;
        for name in cancelled {
            self.scheduler.cancel(&name);
        }
        for task in deferred {
            let due_ms = self.now_ms.saturating_add(task.delay_ms);
            self.scheduler.schedule(task.name, due_ms, task.effect);
        }
        for effect in &effects {
            match effect {
                RuntimeEffect::Render(RenderInstruction::CreateWindow(view)) => {
                    logging::log!("opened {} ({})", view.id, view.title);
                }
                RuntimeEffect::Render(RenderInstruction::WindowClosing(id)) => {
                    logging::log!("closed {id}");
                }
                _ => {}
            }
        }
        self.presentation.run_effects(effects);
    }

    /// Advances the clock and runs every deferred effect that is now due.
    ///
    /// The clock never moves backwards; an earlier `now_ms` is ignored.
    pub fn tick(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        let due = self.scheduler.advance(self.now_ms);
        self.presentation.run_effects(due);
    }

    /// Maps and dispatches a keyboard event. Returns whether the key is a desktop shortcut, so
    /// the host can suppress the browser default.
    pub fn handle_key(&mut self, chord: &KeyChord, phase: KeyPhase) -> bool {
        let Some(command) = map_key_event(chord, phase, self.state.switcher().is_open()) else {
            return false;
        };
        self.dispatch(command);
        true
    }

    /// Opens a window for `file_type`, returning its id.
    pub fn open_file(&mut self, file_type: &str) -> Option<WindowId> {
        self.dispatch(DesktopCommand::OpenFile {
            file_type: file_type.to_string(),
        })
        .then(|| self.state.active_window())
        .flatten()
    }

    pub fn close_window(&mut self, window_id: WindowId) -> bool {
        self.dispatch(DesktopCommand::CloseWindow { window_id })
    }

    pub fn minimize_window(&mut self, window_id: WindowId) -> bool {
        self.dispatch(DesktopCommand::MinimizeWindow { window_id })
    }

    pub fn toggle_maximize(&mut self, window_id: WindowId) -> bool {
        self.dispatch(DesktopCommand::ToggleMaximize { window_id })
    }

    pub fn set_active_window(&mut self, window_id: WindowId) -> bool {
        self.dispatch(DesktopCommand::SetActiveWindow { window_id })
    }

    pub fn set_window_bounds(&mut self, window_id: WindowId, bounds: WindowRect) -> bool {
        self.dispatch(DesktopCommand::SetWindowBounds { window_id, bounds })
    }

    pub fn show_desktop(&mut self) -> bool {
        self.dispatch(DesktopCommand::ShowDesktop)
    }

    pub fn cycle_windows(&mut self, direction: CycleDirection) -> bool {
        self.dispatch(DesktopCommand::CycleWindows { direction })
    }

    pub fn commit_switcher(&mut self) -> bool {
        self.dispatch(DesktopCommand::CommitSwitcher)
    }

    pub fn cancel_switcher(&mut self) -> bool {
        self.dispatch(DesktopCommand::CancelSwitcher)
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Whether a deferred effect is pending under `name`.
    pub fn is_scheduled(&self, name: &str) -> bool {
        self.scheduler.is_scheduled(name)
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }
}
