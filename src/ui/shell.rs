use dioxus::prelude::*;

use crate::app::Route;
use crate::ui::menu::{MenuItem, MENU};
use crate::ui::theme;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let version = version_label();

    rsx! {
        div { class: "app-shell",
            nav { class: "app-shell__nav",
                h1 { class: "app-shell__brand", "📦 {APP_NAME}" }
                for section in MENU.iter() {
                    div { class: "nav-section",
                        p { class: "nav-section__title", "{section.title}" }
                        for item in section.items.iter() {
                            NavButton {
                                item: item.clone(),
                                active: item.route == current_route,
                            }
                        }
                    }
                }
            }
            main { class: "app-shell__main",
                {children}
            }
            footer { class: "app-shell__footer", "{APP_NAME} {version}" }
        }
    }
}

#[component]
fn NavButton(item: MenuItem, active: bool) -> Element {
    let nav = use_navigator();
    let target = item.route.clone();

    rsx! {
        button {
            class: theme::nav_link(active),
            onclick: move |_| {
                nav.push(target.clone());
            },
            "{item.label}"
        }
    }
}
