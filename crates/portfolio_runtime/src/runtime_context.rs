//! Runtime provider and context wiring for the portfolio desktop.
//!
//! [`DesktopProvider`] owns the long-lived [`DesktopController`] and publishes its
//! [`DesktopView`] through a signal the shell components bind to. Browser listeners live in
//! [`crate::host`].

use leptos::*;

use crate::{
    config::DesktopConfig,
    controller::DesktopController,
    frame_batch::FrameBatcher,
    host,
    presentation::{DesktopView, HoverTarget},
    reducer::DesktopCommand,
    shortcuts::{KeyChord, KeyPhase},
};

type Controller = DesktopController<DesktopView>;

#[derive(Clone, Copy)]
/// Leptos context for reading the desktop view and dispatching [`DesktopCommand`] values.
pub struct DesktopRuntimeContext {
    /// Render-ready desktop snapshot.
    pub view: RwSignal<DesktopView>,
    /// Controller owning logical state and pending deferred effects.
    pub controller: StoredValue<Controller>,
    /// Hover updates waiting for the next animation frame.
    pub hover: StoredValue<FrameBatcher<HoverTarget, bool>>,
    /// Command dispatch callback.
    pub dispatch: Callback<DesktopCommand>,
}

impl DesktopRuntimeContext {
    pub fn dispatch_command(&self, command: DesktopCommand) {
        self.dispatch.call(command);
    }

    /// Runs `f` against the controller and republishes the view when it changed.
    pub(crate) fn with_controller<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
        update_and_publish(self.view, self.controller, f)
    }

    /// Clock click: posts today's date as a notification.
    pub fn show_calendar(&self) {
        self.dispatch_command(DesktopCommand::ShowCalendar {
            today: host::today_label(),
        });
    }

    /// Returns whether the key was a desktop shortcut.
    pub fn handle_key(&self, chord: &KeyChord, phase: KeyPhase) -> bool {
        let now_ms = host::now_ms();
        self.with_controller(|controller| {
            controller.tick(now_ms);
            controller.handle_key(chord, phase)
        })
        .unwrap_or(false)
    }

    pub fn tick(&self, now_ms: u64) {
        self.with_controller(|controller| controller.tick(now_ms));
    }

    /// Queues a cosmetic hover change for the next animation frame.
    pub fn set_hover(&self, target: HoverTarget, hovered: bool) {
        host::schedule_hover(*self, target, hovered);
    }
}

fn update_and_publish<R>(
    view: RwSignal<DesktopView>,
    controller: StoredValue<Controller>,
    f: impl FnOnce(&mut Controller) -> R,
) -> Option<R> {
    let (result, next) = controller.try_update_value(|controller| {
        let result = f(controller);
        (result, controller.presentation().clone())
    })?;
    if view.with_untracked(|current| *current != next) {
        view.set(next);
    }
    Some(result)
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and installs browser listeners.
pub fn DesktopProvider(
    /// Desktop configuration; invalid values fall back to the defaults.
    #[prop(optional)]
    config: Option<DesktopConfig>,
    children: Children,
) -> impl IntoView {
    let mut config = config.unwrap_or_default();
    if let Err(err) = config.validate() {
        logging::warn!("desktop config rejected, using defaults: {err}");
        config = DesktopConfig::default();
    }

    let view = create_rw_signal(DesktopView::with_volume(config.default_volume));
    let presentation = view.get_untracked();
    let controller = store_value(DesktopController::with_builtin_templates(
        config,
        presentation,
    ));
    let hover = store_value(FrameBatcher::default());

    let dispatch = Callback::new(move |command: DesktopCommand| {
        let now_ms = host::now_ms();
        update_and_publish(view, controller, |controller| {
            controller.tick(now_ms);
            controller.dispatch(command)
        });
    });

    let runtime = DesktopRuntimeContext {
        view,
        controller,
        hover,
        dispatch,
    };
    provide_context(runtime);
    host::install(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
