use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub player_name: AttrValue,
    pub total_points: u32,
    pub badge_count: usize,
    pub progress_percent: f64,
    pub progress_label: AttrValue,
    pub can_certify: bool,
    pub on_name_input: Callback<String>,
    pub on_reset: Callback<()>,
    pub on_certificate: Callback<()>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_input = {
        let cb = p.on_name_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };
    let reset = {
        let cb = p.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let certificate = {
        let cb = p.on_certificate.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let bar_style = format!("width: {:.1}%", p.progress_percent);

    html! {
        <header role="banner" class="quest-header">
            <div class="header-content">
                <h1 class="header-title">{"Power BI Quest 🎮"}</h1>
                <label for="playerName" class="sr-only">{"Your name"}</label>
                <input
                    id="playerName"
                    type="text"
                    placeholder="Enter your name"
                    value={p.player_name.clone()}
                    oninput={on_input}
                />
                <div class="header-stats" aria-live="polite">
                    <span id="totalPoints" class="stat">{ format!("⭐ {} Points", p.total_points) }</span>
                    <span id="badgeCount" class="stat">{ format!("🏆 {}/5 Badges", p.badge_count) }</span>
                </div>
                <div class="header-actions">
                    if p.can_certify {
                        <button id="certificateBtn" class="btn btn-primary" onclick={certificate}>{"🎓 Get Certificate"}</button>
                    }
                    <button id="resetBtn" class="btn btn-outline" onclick={reset}>{"🔄 Reset"}</button>
                </div>
            </div>
            <div class="progress" role="progressbar" aria-label="Overall progress">
                <div id="overallProgress" class="progress__fill" style={bar_style}></div>
            </div>
            <p id="progressText" class="progress__label">{ p.progress_label.clone() }</p>
        </header>
    }
}
