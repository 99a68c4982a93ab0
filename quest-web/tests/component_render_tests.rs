use chrono::NaiveDate;
use futures::executor::block_on;
use quest_game::{
    BadgeId, Badges, GameState, MemoryStore, ModuleId, ProgressTracker, QuestEngine,
    issue_certificate,
};
use quest_web::app::{QuestView, ViewProps, name_for_reset};
use quest_web::components::badge_shelf::BadgeShelf;
use quest_web::components::dialogs::{CertificateDialog, ResetDialog};
use quest_web::components::header::Header;
use quest_web::components::modal::Modal;
use quest_web::components::module_panel::ModulePanel;
use quest_web::components::nav::Tab;
use quest_web::components::notifications::{Confetti, Notifications, Toast, ToastKind};
use quest_web::components::overview::Overview;
use yew::html::ChildrenRenderer;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn finished_state(name: &str) -> GameState {
    let mut tracker = ProgressTracker::default();
    tracker.set_player_name(name);
    for module in ModuleId::ALL {
        for n in 1..=module.config().steps {
            tracker.complete(module, n).unwrap();
        }
    }
    tracker.into_state()
}

fn view_props(state: GameState, active: Tab) -> ViewProps {
    ViewProps {
        state,
        active,
        toasts: Vec::new(),
        celebrating: false,
        reset_request: None,
        certificate: None,
        on_select: Callback::noop(),
        on_complete: Callback::noop(),
        on_name_input: Callback::noop(),
        on_reset_open: Callback::noop(),
        on_reset_confirm: Callback::noop(),
        on_reset_cancel: Callback::noop(),
        on_certificate_open: Callback::noop(),
        on_certificate_close: Callback::noop(),
        on_certificate_download: Callback::noop(),
        on_certificate_download_pdf: Callback::noop(),
    }
}

#[test]
fn header_shows_stats_and_hides_certificate_until_eligible() {
    let props = quest_web::components::header::Props {
        player_name: AttrValue::from("Ada"),
        total_points: 75,
        badge_count: 0,
        progress_percent: 15.8,
        progress_label: AttrValue::from("16% Complete"),
        can_certify: false,
        on_name_input: Callback::noop(),
        on_reset: Callback::noop(),
        on_certificate: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Header>::with_props(props.clone()).render());
    assert!(html.contains("⭐ 75 Points"));
    assert!(html.contains("🏆 0/5 Badges"));
    assert!(html.contains("16% Complete"));
    assert!(html.contains("resetBtn"));
    assert!(!html.contains("certificateBtn"));

    let eligible = quest_web::components::header::Props {
        can_certify: true,
        ..props
    };
    let html = block_on(LocalServerRenderer::<Header>::with_props(eligible).render());
    assert!(html.contains("certificateBtn"));
}

#[test]
fn module_panel_marks_completed_steps_and_status() {
    let props = quest_web::components::module_panel::Props {
        module: ModuleId::Data,
        progress: 2,
        completed: vec![1, 3],
        badge_unlocked: false,
        on_complete: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ModulePanel>::with_props(props).render());
    assert!(html.contains("dataProgress"));
    assert!(html.contains("2/4 Steps Complete"));
    assert_eq!(html.matches("step completed").count(), 2);
    assert!(html.contains("data-step=\"4\""));
    assert!(!html.contains("dataSuccess"));
}

#[test]
fn module_panel_shows_success_box_once_badge_is_earned() {
    let props = quest_web::components::module_panel::Props {
        module: ModuleId::Format,
        progress: 4,
        completed: vec![1, 2, 3, 4],
        badge_unlocked: true,
        on_complete: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ModulePanel>::with_props(props).render());
    assert!(html.contains("4/4 Steps Complete"));
    assert!(html.contains("designSuccess"));
    assert!(html.contains("Design Guru"));
}

#[test]
fn badge_shelf_reflects_lock_state() {
    let mut badges = Badges::default();
    badges.unlock(BadgeId::Visual);
    let props = quest_web::components::badge_shelf::Props { badges };
    let html = block_on(LocalServerRenderer::<BadgeShelf>::with_props(props).render());
    assert!(html.contains("badge-visual"));
    assert_eq!(html.matches("badge unlocked").count(), 1);
    assert_eq!(html.matches("badge locked").count(), 4);
}

#[test]
fn overview_shows_celebration_only_when_finished() {
    let progress: Vec<_> = ModuleId::ALL.into_iter().map(|id| (id, 0)).collect();
    let props = quest_web::components::overview::Props {
        progress: progress.clone(),
        badges: Badges::default(),
        game_completed: false,
        completion_date: None,
        on_select: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Overview>::with_props(props).render());
    assert!(html.contains("0/4 steps"));
    assert!(html.contains("815"));
    assert!(!html.contains("finalCelebration"));

    let props = quest_web::components::overview::Props {
        progress,
        badges: Badges::default(),
        game_completed: true,
        completion_date: Some(AttrValue::from("Completed on May 1, 2024")),
        on_select: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Overview>::with_props(props).render());
    assert!(html.contains("finalCelebration"));
    assert!(html.contains("Completed on May 1, 2024"));
}

#[test]
fn modal_renders_when_open_and_skips_when_closed() {
    let open = quest_web::components::modal::Props {
        open: true,
        title: AttrValue::from("Title"),
        on_close: Callback::noop(),
        description: Some(AttrValue::from("Desc")),
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(open).render());
    assert!(html.contains("Title"));
    assert!(html.contains("Desc"));

    let closed = quest_web::components::modal::Props {
        open: false,
        title: AttrValue::from("Title"),
        on_close: Callback::noop(),
        description: None,
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(closed).render());
    assert!(!html.contains("Title"));
}

#[test]
fn reset_dialog_lists_what_will_be_lost() {
    let engine = QuestEngine::open(MemoryStore::new());
    let mut tracker = engine.tracker().clone();
    tracker.complete(ModuleId::Data, 1).unwrap();
    let props = quest_web::components::dialogs::ResetProps {
        request: Some(tracker.request_reset()),
        on_confirm: Callback::noop(),
        on_cancel: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ResetDialog>::with_props(props).render());
    assert!(html.contains("confirmResetBtn"));
    assert!(html.contains("You will lose 25 points, 0 badges and 1 completed steps."));

    let closed = quest_web::components::dialogs::ResetProps {
        request: None,
        on_confirm: Callback::noop(),
        on_cancel: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ResetDialog>::with_props(closed).render());
    assert!(!html.contains("confirmResetBtn"));
}

#[test]
fn certificate_dialog_shows_name_date_and_score() {
    let state = finished_state("Ada Lovelace");
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let certificate = issue_certificate(&state, date).unwrap();
    let props = quest_web::components::dialogs::CertificateProps {
        certificate: Some(certificate),
        on_close: Callback::noop(),
        on_download: Callback::noop(),
        on_download_pdf: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<CertificateDialog>::with_props(props).render());
    assert!(html.contains("Download as PDF"));
    assert!(html.contains("Download as Image"));
    assert!(html.contains("certificateName"));
    assert!(html.contains("Ada Lovelace"));
    assert!(html.contains("Date: May 1, 2024"));
    assert!(html.contains("Score: 815 Points"));
}

#[test]
fn notifications_and_confetti_render_from_props() {
    let props = quest_web::components::notifications::Props {
        toasts: vec![Toast::new("+25 points!", ToastKind::Points)],
    };
    let html = block_on(LocalServerRenderer::<Notifications>::with_props(props).render());
    assert!(html.contains("+25 points!"));

    let on = quest_web::components::notifications::ConfettiProps { active: true };
    let html = block_on(LocalServerRenderer::<Confetti>::with_props(on).render());
    assert_eq!(html.matches("class=\"confetti\"").count(), 20);

    let off = quest_web::components::notifications::ConfettiProps { active: false };
    let html = block_on(LocalServerRenderer::<Confetti>::with_props(off).render());
    assert!(!html.contains("confetti"));
}

#[test]
fn quest_view_switches_between_overview_and_module_panels() {
    let html = block_on(
        LocalServerRenderer::<QuestView>::with_props(view_props(GameState::default(), Tab::Overview))
            .render(),
    );
    assert!(html.contains("id=\"overview\""));
    assert!(!html.contains("visualStatus"));

    let html = block_on(
        LocalServerRenderer::<QuestView>::with_props(view_props(
            GameState::default(),
            Tab::Module(ModuleId::Visual),
        ))
        .render(),
    );
    assert!(html.contains("visualStatus"));
    assert!(html.contains("0/5 Steps Complete"));
}

#[test]
fn quest_view_offers_certificate_for_named_finished_player() {
    let state = finished_state("Grace");
    let html = block_on(
        LocalServerRenderer::<QuestView>::with_props(view_props(state, Tab::Overview)).render(),
    );
    assert!(html.contains("certificateBtn"));
    assert!(html.contains("100% Complete"));
    assert!(html.contains("finalCelebration"));
}

#[test]
fn reset_keeps_the_name_currently_typed_in_the_header() {
    assert_eq!(name_for_reset(Some("Grace".to_string()), "Ada"), "Grace");
    assert_eq!(name_for_reset(Some(String::new()), "Ada"), "");
    assert_eq!(name_for_reset(None, "Ada"), "Ada");
}
