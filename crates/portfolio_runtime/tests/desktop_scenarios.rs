use portfolio_runtime::{
    presentation::DesktopView, AppType, CycleDirection, DesktopConfig, DesktopController,
    RecordingPresentation, WindowId,
};
use pretty_assertions::assert_eq;

fn desktop() -> DesktopController<DesktopView> {
    DesktopController::with_builtin_templates(DesktopConfig::default(), DesktopView::default())
}

fn title(controller: &DesktopController<DesktopView>, id: WindowId) -> String {
    controller.state().window(id).expect("window").title.clone()
}

#[test]
fn recognized_opens_create_windows_and_unknown_types_do_not() {
    let mut controller = desktop();
    let requests = ["about", "games", "resume", "", "about", "Social"];
    let opened = requests
        .iter()
        .filter_map(|file_type| controller.open_file(file_type))
        .count();

    assert_eq!(opened, 3);
    assert_eq!(controller.state().registry().len(), 3);
}

#[test]
fn minimize_then_close_leaves_no_active_window() {
    let mut controller = desktop();
    let about = controller.open_file("about").expect("about");
    let resume = controller.open_file("resume").expect("resume");

    assert_eq!(controller.state().registry().len(), 2);
    assert_eq!(controller.state().taskbar().groups().len(), 2);
    assert_eq!(title(&controller, resume), "Resume.pdf");
    assert_eq!(controller.state().active_window(), Some(resume));

    controller.minimize_window(resume);
    assert_eq!(controller.state().active_window(), Some(about));
    assert_eq!(title(&controller, about), "About Me.txt");
    assert!(
        controller
            .state()
            .taskbar()
            .group(AppType::Resume)
            .expect("resume group")
            .minimized
    );

    controller.close_window(about);
    assert_eq!(controller.state().registry().len(), 1);
    assert_eq!(controller.state().active_window(), None);

    controller.set_active_window(resume);
    assert_eq!(controller.state().active_window(), Some(resume));
}

#[test]
fn same_app_type_windows_share_one_badged_group() {
    let mut controller = desktop();
    let first = controller.open_file("about").expect("first");
    let second = controller.open_file("about").expect("second");
    assert_ne!(first, second);

    let groups = controller.state().taskbar().groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].member_window_ids, vec![first, second]);
    assert_eq!(groups[0].label(), "About Me.txt (2)");

    let taskbar = &controller.presentation().taskbar;
    assert_eq!(taskbar.len(), 1);
    assert_eq!(taskbar[0].label, "About Me.txt (2)");
    assert_eq!(taskbar[0].icon, "👤");
}

#[test]
fn closing_the_last_member_removes_the_group() {
    let mut controller = desktop();
    let first = controller.open_file("contact").expect("first");
    let second = controller.open_file("contact").expect("second");

    controller.close_window(first);
    assert_eq!(controller.state().taskbar().groups().len(), 1);
    controller.close_window(second);
    assert!(controller.state().taskbar().groups().is_empty());
    assert!(controller.presentation().taskbar.is_empty());
}

#[test]
fn closing_active_window_activates_most_recently_focused_visible_window() {
    let mut controller = desktop();
    let about = controller.open_file("about").expect("about");
    let resume = controller.open_file("resume").expect("resume");
    let projects = controller.open_file("projects").expect("projects");

    controller.set_active_window(resume);
    controller.set_active_window(projects);
    controller.close_window(projects);
    assert_eq!(controller.state().active_window(), Some(resume));

    controller.close_window(resume);
    assert_eq!(controller.state().active_window(), Some(about));
}

#[test]
fn switcher_with_two_windows_commits_the_inactive_one() {
    let mut controller = desktop();
    let about = controller.open_file("about").expect("about");
    let resume = controller.open_file("resume").expect("resume");
    assert_eq!(controller.state().active_window(), Some(resume));

    assert!(controller.cycle_windows(CycleDirection::Forward));
    assert!(controller.commit_switcher());
    assert_eq!(controller.state().active_window(), Some(about));
    assert!(controller.presentation().switcher.is_none());
}

#[test]
fn switcher_snapshot_ignores_windows_opened_mid_session() {
    let mut controller = desktop();
    controller.open_file("about");
    controller.open_file("resume");
    controller.cycle_windows(CycleDirection::Forward);
    controller.open_file("skills");

    let candidates = controller
        .state()
        .switcher()
        .state()
        .expect("open")
        .candidate_ids()
        .len();
    assert_eq!(candidates, 2);
}

#[test]
fn cycling_with_a_single_visible_window_is_ignored() {
    let mut controller = desktop();
    let about = controller.open_file("about").expect("about");
    let resume = controller.open_file("resume").expect("resume");
    controller.minimize_window(about);

    assert!(!controller.cycle_windows(CycleDirection::Forward));
    assert!(!controller.state().switcher().is_open());
    assert_eq!(controller.state().active_window(), Some(resume));
}

#[test]
fn show_desktop_alternates_between_all_hidden_and_all_shown() {
    let mut controller = desktop();
    let ids: Vec<WindowId> = ["about", "resume", "skills"]
        .iter()
        .filter_map(|file_type| controller.open_file(file_type))
        .collect();

    controller.show_desktop();
    assert!(ids
        .iter()
        .all(|id| controller.state().window(*id).expect("window").is_minimized()));
    assert_eq!(controller.state().active_window(), None);

    controller.show_desktop();
    assert!(ids
        .iter()
        .all(|id| controller.state().window(*id).expect("window").is_visible()));
    assert_eq!(controller.state().active_window(), ids.last().copied());
    assert!(ids
        .iter()
        .all(|id| controller.presentation().window(*id).expect("surface").visible));
}

#[test]
fn maximize_round_trip_restores_previous_bounds() {
    let mut controller = desktop();
    let id = controller.open_file("resume").expect("resume");
    let before = controller.state().window(id).expect("window").bounds;

    controller.toggle_maximize(id);
    controller.toggle_maximize(id);

    let window = controller.state().window(id).expect("window");
    assert_eq!(window.bounds, before);
    assert!(!window.maximized);
    assert_eq!(window.saved_bounds, None);
}

#[test]
fn unknown_window_ids_are_silently_ignored() {
    let mut controller = DesktopController::with_builtin_templates(
        DesktopConfig::default(),
        RecordingPresentation::default(),
    );
    controller.open_file("about");
    controller.presentation_mut().take();

    let ghost = WindowId(99);
    assert!(!controller.close_window(ghost));
    assert!(!controller.minimize_window(ghost));
    assert!(!controller.toggle_maximize(ghost));
    assert!(!controller.set_active_window(ghost));
    assert!(controller.presentation().effects.is_empty());
    assert_eq!(controller.state().registry().len(), 1);
}

#[test]
fn custom_config_changes_stacking_base_and_cascade() {
    let config = DesktopConfig::from_toml_str(
        r#"
        z_index_base = 1000
        cascade_step = 10
        "#,
    )
    .expect("valid config");
    let mut controller = DesktopController::with_builtin_templates(config, DesktopView::default());

    controller.open_file("about");
    let second = controller.open_file("skills").expect("skills");
    let surface = controller.presentation().window(second).expect("surface");
    assert_eq!(surface.z_index, 1002);
    assert_eq!((surface.bounds.x, surface.bounds.y), (110, 60));
}
