use quest_game::{BadgeId, Badges};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub badges: Badges,
}

const fn badge_icon(badge: BadgeId) -> &'static str {
    match badge {
        BadgeId::Data => "📊",
        BadgeId::Visual => "📈",
        BadgeId::Design => "🎨",
        BadgeId::Interactive => "🖱️",
        BadgeId::Publisher => "🚀",
    }
}

#[function_component(BadgeShelf)]
pub fn badge_shelf(p: &Props) -> Html {
    html! {
        <ul class="badges" aria-label="Badges">
            { for BadgeId::ALL.into_iter().map(|badge| {
                let unlocked = p.badges.is_unlocked(badge);
                let class = classes!("badge", if unlocked { "unlocked" } else { "locked" });
                html! {
                    <li id={format!("badge-{badge}")} {class}>
                        <span class="badge__icon" aria-hidden="true">{ badge_icon(badge) }</span>
                        <span class="badge__name">{ badge.display_name() }</span>
                    </li>
                }
            }) }
        </ul>
    }
}
