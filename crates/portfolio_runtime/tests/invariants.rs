use std::collections::BTreeSet;

use portfolio_runtime::{
    reduce_desktop, AppType, BuiltinTemplates, CycleDirection, DesktopCommand, DesktopConfig,
    DesktopState, GroupMenuAction, RenderInstruction, RuntimeEffect, TaskbarMenuItem, WindowId,
};
use proptest::prelude::*;

const FILE_TYPES: [&str; 7] = [
    "about", "resume", "projects", "skills", "contact", "social", "bogus",
];

const APP_TYPES: [AppType; 6] = [
    AppType::About,
    AppType::Resume,
    AppType::Projects,
    AppType::Skills,
    AppType::Contact,
    AppType::Social,
];

fn window_id() -> impl Strategy<Value = WindowId> {
    (1u64..10).prop_map(WindowId)
}

fn app_type() -> impl Strategy<Value = AppType> {
    prop::sample::select(APP_TYPES.to_vec())
}

fn window_command() -> BoxedStrategy<DesktopCommand> {
    prop_oneof![
        prop::sample::select(FILE_TYPES.to_vec()).prop_map(|file_type| {
            DesktopCommand::OpenFile {
                file_type: file_type.to_string(),
            }
        }),
        window_id().prop_map(|window_id| DesktopCommand::CloseWindow { window_id }),
        Just(DesktopCommand::CloseActiveWindow),
        window_id().prop_map(|window_id| DesktopCommand::MinimizeWindow { window_id }),
        window_id().prop_map(|window_id| DesktopCommand::ToggleMaximize { window_id }),
        window_id().prop_map(|window_id| DesktopCommand::SetActiveWindow { window_id }),
        Just(DesktopCommand::ShowDesktop),
        "[a-z ]{0,6}".prop_map(|query| DesktopCommand::ExecuteSearch { query }),
    ]
    .boxed()
}

fn surface_command() -> BoxedStrategy<DesktopCommand> {
    let menu_action = prop::sample::select(vec![
        GroupMenuAction::Restore,
        GroupMenuAction::Minimize,
        GroupMenuAction::Close,
    ]);
    prop_oneof![
        app_type().prop_map(|app_type| DesktopCommand::TaskbarGroupClick { app_type }),
        (app_type(), menu_action).prop_map(|(app_type, action)| {
            DesktopCommand::TaskbarContextAction { app_type, action }
        }),
        window_id().prop_map(|window_id| DesktopCommand::ChooseGroupWindow { window_id }),
        prop::sample::select(vec![CycleDirection::Forward, CycleDirection::Backward])
            .prop_map(|direction| DesktopCommand::CycleWindows { direction }),
        Just(DesktopCommand::CommitSwitcher),
        Just(DesktopCommand::Escape),
        Just(DesktopCommand::ShowTaskView),
        window_id().prop_map(|window_id| DesktopCommand::CloseTaskViewWindow { window_id }),
        Just(DesktopCommand::OpenTaskbarMenu),
        Just(DesktopCommand::TaskbarMenuAction {
            item: TaskbarMenuItem::ShowDesktop,
        }),
        app_type().prop_map(|app_type| DesktopCommand::HoverTaskbarGroup { app_type }),
    ]
    .boxed()
}

fn command() -> impl Strategy<Value = DesktopCommand> {
    prop_oneof![3 => window_command(), 2 => surface_command()]
}

fn check_invariants(state: &DesktopState) -> Result<(), TestCaseError> {
    let registry = state.registry();
    let active = state.active_window();

    if let Some(active) = active {
        prop_assert!(registry.is_visible(active), "active {active} is not visible");
        let active_z = state.focus().z_index(active);
        for window in registry.all() {
            prop_assert!(state.focus().z_index(window.id) <= active_z);
        }
    }
    if registry.visible().next().is_some() {
        prop_assert!(active.is_some(), "visible windows but no active window");
    }

    let z_values: Vec<u32> = registry
        .all()
        .iter()
        .filter_map(|window| state.focus().z_index(window.id))
        .collect();
    let distinct: BTreeSet<u32> = z_values.iter().copied().collect();
    prop_assert_eq!(distinct.len(), z_values.len());

    let mut grouped = BTreeSet::new();
    for group in state.taskbar().groups() {
        prop_assert!(!group.member_window_ids.is_empty());
        for id in &group.member_window_ids {
            let window = registry
                .get(*id)
                .map_err(|err| TestCaseError::fail(err.to_string()))?;
            prop_assert_eq!(window.app_type, group.app_type);
            prop_assert!(grouped.insert(*id), "{} is in two groups", id);
        }
    }
    prop_assert_eq!(grouped.len(), registry.len());

    if let Some(app_type) = state.group_chooser() {
        let members = state
            .taskbar()
            .group(app_type)
            .map_or(0, |group| group.member_window_ids.len());
        prop_assert!(members >= 2, "chooser open for {:?} with {} windows", app_type, members);
    }

    if let Some(switcher) = state.switcher().state() {
        prop_assert!(switcher.selected_index() < switcher.candidate_ids().len());
    }
    Ok(())
}

proptest! {
    #[test]
    fn desktop_invariants_hold_for_any_command_sequence(
        commands in prop::collection::vec(command(), 1..60)
    ) {
        let config = DesktopConfig::default();
        let mut state = DesktopState::new(&config);
        let mut opened = 0usize;
        let mut closed = 0usize;

        for command in commands {
            let before = state.clone();
            match reduce_desktop(&mut state, &config, &BuiltinTemplates, command) {
                Ok(transition) => {
                    for effect in &transition.effects {
                        match effect {
                            RuntimeEffect::Render(RenderInstruction::CreateWindow(_)) => {
                                opened += 1;
                            }
                            RuntimeEffect::Render(RenderInstruction::WindowClosing(_)) => {
                                closed += 1;
                            }
                            _ => {}
                        }
                    }
                }
                Err(_) => {
                    prop_assert_eq!(&state, &before);
                }
            }
            check_invariants(&state)?;
            prop_assert_eq!(state.registry().len(), opened - closed);
        }
    }

    #[test]
    fn only_recognized_file_types_open_windows(
        requests in prop::collection::vec(prop::sample::select(FILE_TYPES.to_vec()), 0..20)
    ) {
        let config = DesktopConfig::default();
        let mut state = DesktopState::new(&config);
        let mut expected = 0usize;
        for file_type in requests {
            if file_type != "bogus" {
                expected += 1;
            }
            let _ = reduce_desktop(
                &mut state,
                &config,
                &BuiltinTemplates,
                DesktopCommand::OpenFile { file_type: file_type.to_string() },
            );
        }
        prop_assert_eq!(state.registry().len(), expected);
    }
}
