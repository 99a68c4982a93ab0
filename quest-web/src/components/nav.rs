use quest_game::ModuleId;
use yew::prelude::*;

use crate::content::module_content;

/// Which panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Module(ModuleId),
}

impl Tab {
    #[must_use]
    pub fn all() -> Vec<Self> {
        std::iter::once(Self::Overview)
            .chain(ModuleId::ALL.into_iter().map(Self::Module))
            .collect()
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Module(id) => id.as_str(),
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Overview => "🏠 Overview".to_string(),
            Self::Module(id) => {
                let content = module_content(id);
                format!("{} {}", content.icon, content.title)
            }
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub active: Tab,
    pub on_select: Callback<Tab>,
}

#[function_component(NavTabs)]
pub fn nav_tabs(p: &Props) -> Html {
    html! {
        <nav class="nav-tabs" aria-label="Modules">
            { for Tab::all().into_iter().map(|tab| {
                let onclick = {
                    let cb = p.on_select.clone();
                    Callback::from(move |_| cb.emit(tab))
                };
                let active = tab == p.active;
                html! {
                    <button
                        type="button"
                        class={classes!("nav-tab", active.then_some("active"))}
                        data-module={tab.key()}
                        aria-current={active.then_some("page")}
                        {onclick}
                    >
                        { tab.label() }
                    </button>
                }
            }) }
        </nav>
    }
}
