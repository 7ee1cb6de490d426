use dioxus::prelude::*;

use crate::domain::SelectOption;
use crate::ui::theme;

/// Labelled dropdown. The empty placeholder entry maps to `None`.
#[component]
pub fn SelectField(
    label: &'static str,
    placeholder: &'static str,
    options: Vec<SelectOption>,
    value: Option<String>,
    #[props(default)] invalid: bool,
    #[props(default)] disabled: bool,
    on_change: EventHandler<Option<String>>,
) -> Element {
    let current = value.unwrap_or_default();
    let disabled = locked(disabled, &options);

    rsx! {
        div { class: "field",
            label { "{label}" }
            select {
                class: theme::input_class(invalid),
                disabled,
                value: "{current}",
                onchange: move |evt| on_change.call(selected_value(&evt.value())),
                option { value: "", selected: current.is_empty(), "{placeholder}" }
                for opt in options {
                    option {
                        value: "{opt.value}",
                        selected: opt.value == current,
                        "{opt.label}"
                    }
                }
            }
            if invalid {
                p { class: "field__error", "{label} is required" }
            }
        }
    }
}

/// Nothing to pick, or the caller froze the form.
fn locked(disabled: bool, options: &[SelectOption]) -> bool {
    disabled || options.is_empty()
}

fn selected_value(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}
