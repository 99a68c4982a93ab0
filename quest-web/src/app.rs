use quest_game::{CertificateData, GameState, ModuleId, ResetRequest};
use yew::prelude::*;

use crate::components::dialogs::{CertificateDialog, ResetDialog};
use crate::components::header::Header;
use crate::components::module_panel::ModulePanel;
use crate::components::nav::{NavTabs, Tab};
use crate::components::notifications::{Confetti, Notifications, Toast};
use crate::components::overview::Overview;

#[derive(Properties, PartialEq, Clone)]
pub struct ViewProps {
    pub state: GameState,
    pub active: Tab,
    pub toasts: Vec<Toast>,
    pub celebrating: bool,
    pub reset_request: Option<ResetRequest>,
    pub certificate: Option<CertificateData>,
    pub on_select: Callback<Tab>,
    pub on_complete: Callback<(ModuleId, u32)>,
    pub on_name_input: Callback<String>,
    pub on_reset_open: Callback<()>,
    pub on_reset_confirm: Callback<()>,
    pub on_reset_cancel: Callback<()>,
    pub on_certificate_open: Callback<()>,
    pub on_certificate_close: Callback<()>,
    pub on_certificate_download: Callback<()>,
    pub on_certificate_download_pdf: Callback<()>,
}

/// Name to keep across a reset: what the header input shows now, or the
/// saved name when the input cannot be read.
#[must_use]
pub fn name_for_reset(input: Option<String>, saved: &str) -> String {
    input.unwrap_or_else(|| saved.to_string())
}

fn completed_numbers(state: &GameState, module: ModuleId) -> Vec<u32> {
    state
        .completed_steps
        .iter()
        .filter(|step| step.module_id() == Some(module))
        .map(quest_game::StepId::number)
        .collect()
}

/// Stateless page body; everything it shows comes from props.
#[function_component(QuestView)]
pub fn quest_view(p: &ViewProps) -> Html {
    let state = &p.state;
    let panel = match p.active {
        Tab::Overview => {
            let progress: Vec<(ModuleId, u32)> = ModuleId::ALL
                .into_iter()
                .map(|id| (id, state.module_progress.get(id)))
                .collect();
            let completion_date = state
                .completion_date
                .map(|date| AttrValue::from(format!("Completed on {}", date.format("%B %-d, %Y"))));
            html! {
                <Overview
                    {progress}
                    badges={state.badges}
                    game_completed={state.game_completed}
                    {completion_date}
                    on_select={p.on_select.clone()}
                />
            }
        }
        Tab::Module(module) => html! {
            <ModulePanel
                {module}
                progress={state.module_progress.get(module)}
                completed={completed_numbers(state, module)}
                badge_unlocked={state.badges.is_unlocked(module.config().badge)}
                on_complete={p.on_complete.clone()}
            />
        },
    };

    html! {
        <>
            <Header
                player_name={AttrValue::from(state.player_name.clone())}
                total_points={state.total_points}
                badge_count={state.badges.unlocked_count()}
                progress_percent={state.overall_percent()}
                progress_label={AttrValue::from(state.overall_label())}
                can_certify={state.certificate_eligible()}
                on_name_input={p.on_name_input.clone()}
                on_reset={p.on_reset_open.clone()}
                on_certificate={p.on_certificate_open.clone()}
            />
            <NavTabs active={p.active} on_select={p.on_select.clone()} />
            <main id="main">{ panel }</main>
            <Notifications toasts={p.toasts.clone()} />
            <Confetti active={p.celebrating} />
            <ResetDialog
                request={p.reset_request.clone()}
                on_confirm={p.on_reset_confirm.clone()}
                on_cancel={p.on_reset_cancel.clone()}
            />
            <CertificateDialog
                certificate={p.certificate.clone()}
                on_close={p.on_certificate_close.clone()}
                on_download={p.on_certificate_download.clone()}
                on_download_pdf={p.on_certificate_download_pdf.clone()}
            />
        </>
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{QuestView, name_for_reset};
    use crate::components::nav::Tab;
    use crate::components::notifications::{Toast, ToastKind, ToastList, notify};
    use crate::dom::{alert, input_value, window};
    use crate::export::{download_certificate_pdf, download_certificate_png};
    use crate::storage::BrowserStore;
    use gloo::events::EventListener;
    use gloo::timers::callback::{Interval, Timeout};
    use quest_game::{
        AUTOSAVE_INTERVAL, CertificateData, ModuleId, QuestEngine, ResetRequest, TrackerEvent,
    };
    use std::cell::RefCell;
    use std::rc::Rc;
    use yew::prelude::*;

    type Engine = Rc<RefCell<QuestEngine<BrowserStore>>>;

    const CELEBRATION_MS: u32 = 3_000;

    /// Save on a timer and once more when the page unloads.
    #[hook]
    fn use_autosave(engine: &Engine) {
        let engine = engine.clone();
        use_effect_with((), move |()| {
            let period = u32::try_from(AUTOSAVE_INTERVAL.as_millis()).unwrap_or(30_000);
            let ticker = {
                let engine = engine.clone();
                Interval::new(period, move || {
                    let _ = engine.borrow().autosave();
                })
            };
            let unload = EventListener::new(&window(), "beforeunload", move |_| {
                let _ = engine.borrow().shutdown();
            });
            move || {
                drop(ticker);
                drop(unload);
            }
        });
    }

    #[function_component(App)]
    pub fn app() -> Html {
        let engine: Engine = use_mut_ref(|| QuestEngine::open(BrowserStore));
        let redraw = use_force_update();
        let active = use_state(Tab::default);
        let toasts = use_reducer(ToastList::default);
        let celebrating = use_state(|| false);
        let reset_request = use_state(|| None::<ResetRequest>);
        let certificate = use_state(|| None::<CertificateData>);

        use_autosave(&engine);

        {
            let toasts = toasts.dispatcher();
            use_effect_with((), move |()| {
                notify(&toasts, Toast::new("Welcome to Power BI Quest! 🎮", ToastKind::Success));
                || {}
            });
        }
        {
            let celebrating = celebrating.clone();
            use_effect_with(*celebrating, move |on| {
                let timer = on.then(|| {
                    let celebrating = celebrating.clone();
                    Timeout::new(CELEBRATION_MS, move || celebrating.set(false))
                });
                move || drop(timer)
            });
        }

        let on_select = {
            let active = active.clone();
            Callback::from(move |tab: Tab| {
                active.set(tab);
                window().scroll_to_with_x_and_y(0.0, 0.0);
            })
        };

        let on_complete = {
            let engine = engine.clone();
            let toasts = toasts.dispatcher();
            let celebrating = celebrating.clone();
            let redraw = redraw.clone();
            Callback::from(move |(module, number): (ModuleId, u32)| {
                let result = engine.borrow_mut().complete_step(module.as_str(), number);
                match result {
                    Ok(outcome) => {
                        for event in outcome.events() {
                            if matches!(
                                event,
                                TrackerEvent::BadgeUnlocked { .. } | TrackerEvent::GameCompleted
                            ) {
                                celebrating.set(true);
                            }
                            notify(&toasts, Toast::from_event(&event));
                        }
                    }
                    Err(err) => log::warn!("rejected step completion: {err}"),
                }
                redraw.force_update();
            })
        };

        let on_name_input = {
            let engine = engine.clone();
            let redraw = redraw.clone();
            Callback::from(move |name: String| {
                engine.borrow_mut().set_player_name(name);
                redraw.force_update();
            })
        };

        let on_reset_open = {
            let engine = engine.clone();
            let reset_request = reset_request.clone();
            Callback::from(move |()| reset_request.set(Some(engine.borrow().request_reset())))
        };
        let on_reset_cancel = {
            let reset_request = reset_request.clone();
            Callback::from(move |()| reset_request.set(None))
        };
        let on_reset_confirm = {
            let engine = engine.clone();
            let reset_request = reset_request.clone();
            let active = active.clone();
            let celebrating = celebrating.clone();
            let toasts = toasts.dispatcher();
            let redraw = redraw.clone();
            Callback::from(move |()| {
                if let Some(request) = (*reset_request).clone() {
                    let saved = engine.borrow().state().player_name.clone();
                    let name = name_for_reset(input_value("playerName"), &saved);
                    engine.borrow_mut().reset(request, name);
                    notify(
                        &toasts,
                        Toast::new(
                            "🎮 Game reset successfully! Start your quest again!",
                            ToastKind::Success,
                        ),
                    );
                }
                reset_request.set(None);
                celebrating.set(false);
                active.set(Tab::Overview);
                redraw.force_update();
            })
        };

        let on_certificate_open = {
            let engine = engine.clone();
            let certificate = certificate.clone();
            Callback::from(move |()| {
                let today = chrono::Utc::now().date_naive();
                let issued = engine.borrow().certificate(today);
                match issued {
                    Ok(cert) => certificate.set(Some(cert)),
                    Err(err) => alert(&err.to_string()),
                }
            })
        };
        let on_certificate_close = {
            let certificate = certificate.clone();
            Callback::from(move |()| certificate.set(None))
        };
        let on_certificate_download = {
            let certificate = certificate.clone();
            Callback::from(move |()| {
                if let Some(cert) = (*certificate).as_ref()
                    && let Err(err) = download_certificate_png(cert)
                {
                    log::error!(
                        "certificate export failed: {}",
                        crate::dom::js_error_message(&err)
                    );
                    alert("Could not create the certificate image. Please try again.");
                }
            })
        };

        let on_certificate_download_pdf = {
            let certificate = certificate.clone();
            Callback::from(move |()| {
                if let Some(cert) = (*certificate).as_ref()
                    && let Err(err) = download_certificate_pdf(cert)
                {
                    log::error!(
                        "certificate PDF export failed: {}",
                        crate::dom::js_error_message(&err)
                    );
                    alert("Could not create the certificate PDF. Please try again.");
                }
            })
        };

        let state = engine.borrow().state().clone();
        html! {
            <QuestView
                {state}
                active={*active}
                toasts={toasts.items.clone()}
                celebrating={*celebrating}
                reset_request={(*reset_request).clone()}
                certificate={(*certificate).clone()}
                {on_select}
                {on_complete}
                {on_name_input}
                {on_reset_open}
                {on_reset_confirm}
                {on_reset_cancel}
                {on_certificate_open}
                {on_certificate_close}
                {on_certificate_download}
                {on_certificate_download_pdf}
            />
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::App;
