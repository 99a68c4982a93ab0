use quest_game::{Badges, ModuleId, max_points, total_steps};
use yew::prelude::*;

use super::badge_shelf::BadgeShelf;
use super::nav::Tab;
use crate::content::module_content;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Completed-step count per module, in catalog order
    pub progress: Vec<(ModuleId, u32)>,
    pub badges: Badges,
    pub game_completed: bool,
    #[prop_or_default]
    pub completion_date: Option<AttrValue>,
    pub on_select: Callback<Tab>,
}

#[function_component(Overview)]
pub fn overview(p: &Props) -> Html {
    let rows = p.progress.iter().map(|&(module, done)| {
        let content = module_content(module);
        let cfg = module.config();
        let onclick = {
            let cb = p.on_select.clone();
            Callback::from(move |_| cb.emit(Tab::Module(module)))
        };
        html! {
            <li class="overview__module">
                <button type="button" class="link" {onclick}>
                    { format!("{} {}", content.icon, content.title) }
                </button>
                <span class="overview__status">{ format!("{done}/{} steps", cfg.steps) }</span>
                <span class="overview__reward">{ format!("{} pts each", cfg.points) }</span>
            </li>
        }
    });

    html! {
        <section id="overview" class="module overview">
            <h2>{"Welcome to Power BI Quest!"}</h2>
            <p>
                { format!(
                    "Work through {} steps across five modules, earn up to {} points and collect every badge to unlock your certificate.",
                    total_steps(),
                    max_points()
                ) }
            </p>
            <ul class="overview__modules">{ for rows }</ul>
            <BadgeShelf badges={p.badges} />
            if p.game_completed {
                <div id="finalCelebration" class="final-celebration">
                    <h3>{"🎉 Quest Completed! 🎉"}</h3>
                    <p>{"You are now a Power BI Master. Add your name and grab your certificate."}</p>
                    if let Some(date) = p.completion_date.clone() {
                        <p class="final-celebration__date">{ date }</p>
                    }
                </div>
            }
        </section>
    }
}
