use quest_game::ModuleId;
use yew::prelude::*;

use crate::content::module_content;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub module: ModuleId,
    pub progress: u32,
    /// Step numbers already completed in this module
    pub completed: Vec<u32>,
    pub badge_unlocked: bool,
    pub on_complete: Callback<(ModuleId, u32)>,
}

#[function_component(ModulePanel)]
pub fn module_panel(p: &Props) -> Html {
    let content = module_content(p.module);
    let cfg = p.module.config();
    let percent = f64::from(p.progress) / f64::from(cfg.steps) * 100.0;
    let module_key = p.module.as_str();

    let steps = content.steps.iter().zip(1..=cfg.steps).map(|(title, number)| {
        let done = p.completed.contains(&number);
        let onclick = {
            let cb = p.on_complete.clone();
            let module = p.module;
            Callback::from(move |_| cb.emit((module, number)))
        };
        let class = classes!("step", done.then_some("completed"));
        html! {
            <li class={class} data-module={module_key} data-step={number.to_string()}>
                <span class="step__number">{ number.to_string() }</span>
                <span class="step__title">{ *title }</span>
                <button type="button" class="btn step__complete" {onclick} disabled={done}>
                    { if done { "✅ Done" } else { "Complete Step" } }
                </button>
            </li>
        }
    });

    html! {
        <section id={module_key} class="module" aria-labelledby={format!("{module_key}-title")}>
            <h2 id={format!("{module_key}-title")}>{ format!("{} {}", content.icon, content.title) }</h2>
            <p class="module__summary">{ content.summary }</p>
            <p class="module__reward">
                { format!("{} points per step · {} badge", cfg.points, cfg.badge.display_name()) }
            </p>
            <div class="progress" role="progressbar" aria-label={format!("{} progress", content.title)}>
                <div id={format!("{module_key}Progress")} class="progress__fill" style={format!("width: {percent:.1}%")}></div>
            </div>
            <p id={format!("{module_key}Status")} class="module__status">
                { format!("{}/{} Steps Complete", p.progress, cfg.steps) }
            </p>
            <ol class="steps">{ for steps }</ol>
            if p.badge_unlocked {
                <div id={format!("{}Success", cfg.badge)} class="success-box">
                    { format!("🏆 {} badge earned! Module complete.", cfg.badge.display_name()) }
                </div>
            }
        </section>
    }
}
