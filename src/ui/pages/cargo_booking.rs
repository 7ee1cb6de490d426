use dioxus::prelude::*;
use tracing::debug;

use crate::{
    app::booking_service,
    domain::{
        local_estimate, to_options, AppState, BookingForm, CargoBooking, CostEstimate, CostSource,
        DeclaredValueInput, DimensionField, FormField, LengthUnit, SubmitBlocked, SubmitOutcome,
        WeightUnit,
    },
    ui::{
        components::{
            select_field::SelectField,
            status_badge::StatusBadge,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
    util::config::app_config,
};

const DIMENSIONS: [(DimensionField, &str); 4] = [
    (DimensionField::Length, "Length"),
    (DimensionField::Width, "Width"),
    (DimensionField::Height, "Height"),
    (DimensionField::Weight, "Weight"),
];

/// Raw text of the numeric inputs, kept apart so partial input like `0.` survives re-renders.
#[derive(Clone, Debug, Default, PartialEq)]
struct Drafts {
    dimensions: [String; 4],
    declared_value: String,
}

#[component]
pub fn CargoBookingPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut form = use_signal(|| BookingForm::new(state.peek().catalog.clone()));
    let mut drafts = use_signal(Drafts::default);
    let mut estimate = use_signal(|| None::<CostEstimate>);
    let mut last_booking = use_signal(|| None::<CargoBooking>);

    // The catalog may finish loading after the page mounted.
    use_effect(move || {
        let catalog = state.read().catalog.clone();
        if catalog.is_some() && !form.peek().has_catalog() {
            form.with_mut(|f| f.set_catalog(catalog));
        }
    });

    let _locations = use_future(move || async move {
        let Some(service) = booking_service(toasts) else {
            return;
        };
        let origins = service.origin_options().await;
        let destinations = service.destination_options().await;
        if origins.is_fallback() || destinations.is_fallback() {
            debug!("using built-in location lists");
        }
        form.with_mut(|f| {
            f.set_origin_options(origins.value);
            f.set_destination_options(destinations.value);
        });
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let ticket = match form.with_mut(|f| f.begin_submit()) {
            Ok(ticket) => ticket,
            Err(SubmitBlocked::InFlight) => return,
            Err(SubmitBlocked::Invalid(errors)) => {
                push_toast(toasts, ToastKind::Warning, errors.summary());
                return;
            }
        };
        let Some(service) = booking_service(toasts) else {
            form.with_mut(|f| {
                f.complete_submit(&ticket, Err("Booking API is not configured.".to_string()))
            });
            return;
        };

        spawn(async move {
            let result = service
                .create_booking(&ticket.booking)
                .await
                .map_err(|err| err.user_message());
            match form.with_mut(|f| f.complete_submit(&ticket, result)) {
                Some(SubmitOutcome::Created(created)) => {
                    push_toast(
                        toasts,
                        ToastKind::Success,
                        "Cargo booking created successfully!",
                    );
                    last_booking.set(Some(created.unwrap_or_else(|| ticket.booking.clone())));

                    tokio::time::sleep(app_config().reset_delay()).await;
                    if form.with_mut(|f| f.reset_after_success(ticket.generation())) {
                        drafts.set(Drafts::default());
                        estimate.set(None);
                    }
                }
                Some(SubmitOutcome::Failed(message)) => {
                    push_toast(toasts, ToastKind::Error, message);
                }
                None => debug!(
                    generation = ticket.generation(),
                    "dropping result of a superseded submission"
                ),
            }
        });
    };

    let on_estimate = move |_| {
        let Some(booking) = form.peek().cost_request() else {
            push_toast(
                toasts,
                ToastKind::Warning,
                "Complete the required fields before estimating the cost.",
            );
            return;
        };
        spawn(async move {
            let result = match booking_service(toasts) {
                Some(service) => service.estimate_cost(&booking).await,
                None => CostEstimate {
                    amount: local_estimate(&booking.dimensions),
                    source: CostSource::LocalFormula,
                },
            };
            push_toast(toasts, ToastKind::Info, result.display());
            estimate.set(Some(result));
        });
    };

    let on_reset = move |_| {
        form.with_mut(|f| f.reset());
        drafts.set(Drafts::default());
        estimate.set(None);
    };

    let f = form.read();
    let options = f.options().clone();
    let selection = f.selection().clone();
    let phase = f.phase();
    let loading = f.is_loading();
    let failure = f.failure_message().map(str::to_string);
    let catalog_ready = f.has_catalog();
    let invalid = |field: FormField| f.shows_error(field);
    let length_units = to_options(LengthUnit::ALL.iter().map(LengthUnit::as_str));
    let weight_units = to_options(WeightUnit::ALL.iter().map(WeightUnit::as_str));
    let drafts_now = drafts();

    rsx! {
        div {
            h2 { class: "page-title", "Cargo Booking" }
            p { class: "page-subtitle", "{phase.label()}" }

            if !catalog_ready {
                p { class: "notice", "Loading cargo catalog…" }
            }

            form {
                onsubmit: on_submit,

                section { class: "panel",
                    h3 { class: "panel__title", "Cargo" }
                    div { class: "grid grid--2",
                        SelectField {
                            label: "Category",
                            placeholder: "Select a category",
                            options: options.categories.clone(),
                            value: selection.category.clone(),
                            disabled: loading,
                            invalid: invalid(FormField::Category),
                            on_change: move |value| form.with_mut(|f| f.select_category(value)),
                        }
                        SelectField {
                            label: "Subcategory",
                            placeholder: "Select a subcategory",
                            options: options.subcategories.clone(),
                            value: selection.subcategory.clone(),
                            disabled: loading,
                            invalid: invalid(FormField::Subcategory),
                            on_change: move |value| form.with_mut(|f| f.select_subcategory(value)),
                        }
                        SelectField {
                            label: "Item type",
                            placeholder: "Select an item type",
                            options: options.item_types.clone(),
                            value: selection.item_type.clone(),
                            disabled: loading,
                            invalid: invalid(FormField::ItemType),
                            on_change: move |value| form.with_mut(|f| f.select_item_type(value)),
                        }
                        SelectField {
                            label: "Package type",
                            placeholder: "Select a package type",
                            options: options.package_types.clone(),
                            value: selection.package_type.clone(),
                            disabled: loading,
                            invalid: invalid(FormField::PackageType),
                            on_change: move |value| form.with_mut(|f| f.select_package_type(value)),
                        }
                    }
                    if options.show_examples() {
                        div { class: "field",
                            label { "Examples" }
                            div { class: "chips",
                                for example in options.examples.iter() {
                                    span { class: "chip", "{example}" }
                                }
                            }
                        }
                    }
                    div { class: "field",
                        label { "Description" }
                        textarea {
                            class: theme::input_class(false),
                            rows: "2",
                            value: "{f.description()}",
                            placeholder: "Optional notes about the cargo",
                            oninput: move |evt| form.with_mut(|f| f.set_description(evt.value())),
                        }
                    }
                }

                section { class: "panel",
                    h3 { class: "panel__title", "Dimensions" }
                    div { class: "grid grid--4",
                        for (index, (field, label)) in DIMENSIONS.into_iter().enumerate() {
                            div { class: "field",
                                label { "{label}" }
                                input {
                                    class: theme::input_class(invalid(field.into())),
                                    inputmode: "decimal",
                                    value: "{drafts_now.dimensions[index]}",
                                    oninput: move |evt| {
                                        let raw = evt.value();
                                        form.with_mut(|f| f.set_dimension(field, parse_number(&raw)));
                                        drafts.with_mut(|d| d.dimensions[index] = raw);
                                    },
                                }
                                if invalid(field.into()) {
                                    p { class: "field__error", "{label} must be at least 0.1" }
                                }
                            }
                        }
                    }
                    div { class: "grid grid--2",
                        SelectField {
                            label: "Length unit",
                            placeholder: "Unit",
                            disabled: loading,
                            options: length_units,
                            value: f.dimensions().unit.map(|unit| unit.as_str().to_string()),
                            on_change: move |value: Option<String>| {
                                let unit = value.as_deref().and_then(LengthUnit::parse);
                                form.with_mut(|f| f.set_length_unit(unit));
                            },
                        }
                        SelectField {
                            label: "Weight unit",
                            placeholder: "Unit",
                            disabled: loading,
                            options: weight_units,
                            value: f.dimensions().weight_unit.map(|unit| unit.as_str().to_string()),
                            on_change: move |value: Option<String>| {
                                let unit = value.as_deref().and_then(WeightUnit::parse);
                                form.with_mut(|f| f.set_weight_unit(unit));
                            },
                        }
                    }
                }

                section { class: "panel",
                    h3 { class: "panel__title", "Value & route" }
                    div { class: "grid grid--2",
                        div { class: "field",
                            label { "Declared value" }
                            input {
                                class: theme::input_class(invalid(FormField::DeclaredValue)),
                                inputmode: "decimal",
                                placeholder: "0.00",
                                value: "{drafts_now.declared_value}",
                                oninput: move |evt| {
                                    let raw = evt.value();
                                    let value = DeclaredValueInput::parse(&raw);
                                    form.with_mut(|f| f.set_declared_value(value));
                                    drafts.with_mut(|d| d.declared_value = raw);
                                },
                            }
                            if invalid(FormField::DeclaredValue) {
                                p { class: "field__error", "Declared value must be a number of 0 or more" }
                            }
                        }
                        label { class: "checkbox",
                            input {
                                r#type: "checkbox",
                                checked: f.insurance(),
                                onchange: move |evt| form.with_mut(|f| f.set_insurance(evt.checked())),
                            }
                            "Insure this shipment"
                        }
                        SelectField {
                            label: "Origin",
                            placeholder: "Select origin",
                            options: f.origin_options().to_vec(),
                            value: f.origin().map(str::to_string),
                            disabled: loading,
                            invalid: invalid(FormField::Origin),
                            on_change: move |value| form.with_mut(|f| f.set_origin(value)),
                        }
                        SelectField {
                            label: "Destination",
                            placeholder: "Select destination",
                            options: f.destination_options().to_vec(),
                            value: f.destination().map(str::to_string),
                            disabled: loading,
                            invalid: invalid(FormField::Destination),
                            on_change: move |value| form.with_mut(|f| f.set_destination(value)),
                        }
                    }
                }

                if let Some(message) = failure {
                    p { class: "notice notice--error", "{message}" }
                }
                if let Some(cost) = estimate() {
                    p { class: "notice",
                        "{cost.display()}"
                        if cost.source == CostSource::LocalFormula {
                            " (offline estimate)"
                        }
                    }
                }

                div { class: "actions",
                    button {
                        class: theme::BTN_GHOST,
                        r#type: "button",
                        onclick: on_reset,
                        "Reset"
                    }
                    button {
                        class: theme::BTN_GHOST,
                        r#type: "button",
                        disabled: loading,
                        onclick: on_estimate,
                        "Estimate cost"
                    }
                    button {
                        class: theme::BTN_PRIMARY,
                        r#type: "submit",
                        disabled: loading,
                        if loading { "Booking…" } else { "Book cargo" }
                    }
                }
            }

            if let Some(booking) = last_booking() {
                LastBookingPanel { booking }
            }
        }
    }
}

#[component]
fn LastBookingPanel(booking: CargoBooking) -> Element {
    let id = booking.id.clone().unwrap_or_else(|| "pending".to_string());
    let dims = &booking.dimensions;
    let size = format!(
        "{} × {} × {} {}, {} {}",
        dims.length,
        dims.width,
        dims.height,
        dims.unit.map(|u| u.as_str()).unwrap_or(""),
        dims.weight,
        dims.weight_unit.map(|u| u.as_str()).unwrap_or(""),
    );
    rsx! {
        section { class: "panel",
            h3 { class: "panel__title", "Last booking" }
            p { "#{id} · {booking.path_label()} · {booking.package_type}" }
            p { class: "notice", "{booking.origin} → {booking.destination} · {size}" }
            StatusBadge { status: booking.status_or_default() }
        }
    }
}

/// Empty or unparsable input reads as "no value".
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
