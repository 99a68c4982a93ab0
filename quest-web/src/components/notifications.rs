use gloo::timers::callback::Timeout;
use quest_game::TrackerEvent;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use yew::prelude::*;

static TOAST_IDS: AtomicU64 = AtomicU64::new(0);

const TOAST_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Points,
}

impl ToastKind {
    const fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Points => "points",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: AttrValue,
    pub kind: ToastKind,
}

impl Toast {
    #[must_use]
    pub fn new(message: impl Into<AttrValue>, kind: ToastKind) -> Self {
        Self {
            id: TOAST_IDS.fetch_add(1, Ordering::Relaxed),
            message: message.into(),
            kind,
        }
    }

    #[must_use]
    pub fn from_event(event: &TrackerEvent) -> Self {
        let kind = match event {
            TrackerEvent::PointsAwarded { .. } => ToastKind::Points,
            _ => ToastKind::Success,
        };
        Self::new(event.message(), kind)
    }
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastList {
    pub items: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Push(toast) => items.push(toast),
            ToastAction::Dismiss(id) => items.retain(|t| t.id != id),
        }
        Rc::new(Self { items })
    }
}

/// Show a toast and schedule its removal.
pub fn notify(toasts: &UseReducerDispatcher<ToastList>, toast: Toast) {
    let id = toast.id;
    toasts.dispatch(ToastAction::Push(toast));
    let toasts = toasts.clone();
    Timeout::new(TOAST_MS, move || toasts.dispatch(ToastAction::Dismiss(id))).forget();
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub toasts: Vec<Toast>,
}

#[function_component(Notifications)]
pub fn notifications(p: &Props) -> Html {
    html! {
        <div class="notifications" role="status" aria-live="polite">
            { for p.toasts.iter().map(|toast| html! {
                <div key={toast.id.to_string()} class={classes!("notification", toast.kind.class())}>
                    { toast.message.clone() }
                </div>
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ConfettiProps {
    pub active: bool,
}

const CONFETTI_COLORS: [&str; 6] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#f9ca24", "#6c5ce7", "#a0e7e5",
];

#[function_component(Confetti)]
pub fn confetti(p: &ConfettiProps) -> Html {
    if !p.active {
        return Html::default();
    }
    html! {
        <div class="confetti-layer" aria-hidden="true">
            { for (0..20_usize).map(|i| {
                let left = (i * 37 + 11) % 100;
                let color = CONFETTI_COLORS[i % CONFETTI_COLORS.len()];
                let delay = (i % 5) * 120;
                html! {
                    <div
                        class="confetti"
                        style={format!("left: {left}%; background-color: {color}; animation-delay: {delay}ms")}
                    />
                }
            }) }
        </div>
    }
}
