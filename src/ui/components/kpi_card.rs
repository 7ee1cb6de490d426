use dioxus::prelude::*;

#[component]
pub fn KpiCard(title: String, value: String, description: Option<String>) -> Element {
    rsx! {
        div {
            class: "kpi",
            h3 { class: "kpi__title", "{title}" }
            p { class: "kpi__value", "{value}" }
            if let Some(desc) = description {
                p { class: "kpi__description", "{desc}" }
            }
        }
    }
}
