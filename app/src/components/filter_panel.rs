//! Filter controls
//!
//! Method, age and training period selects plus one toggle button per
//! county. Every change goes through the session, which decides whether a
//! data request is issued.

use dioxus::prelude::*;

use crate::api::DashboardHandle;

#[component]
pub fn FilterPanel() -> Element {
    let dashboard = use_context::<DashboardHandle>();
    let (options, selection) = {
        let s = dashboard.session.read();
        (s.options().cloned(), s.selection().clone())
    };
    let Some(options) = options else {
        return rsx! {};
    };

    let on_method = {
        let dashboard = dashboard.clone();
        move |e: Event<FormData>| dashboard.apply(|s| s.set_method(&e.value()))
    };
    let on_age = {
        let dashboard = dashboard.clone();
        move |e: Event<FormData>| dashboard.apply(|s| s.set_age(&e.value()))
    };
    let on_period = {
        let dashboard = dashboard.clone();
        move |e: Event<FormData>| dashboard.apply(|s| s.set_period(&e.value()))
    };

    let county_buttons = options.counties.iter().map(|county| {
        let selected = selection.contains_county(county);
        let label = county.clone();
        let county = county.clone();
        let dashboard = dashboard.clone();
        rsx! {
            button {
                key: "{label}",
                class: if selected { "county-btn selected" } else { "county-btn" },
                onclick: move |_| dashboard.apply(|s| s.toggle_county(&county)),
                "{label}"
            }
        }
    });

    rsx! {
        div { class: "filters",
            div { class: "filter-field",
                label { "Evaluation method:" }
                select { onchange: on_method,
                    for method in options.evaluation_methods.iter() {
                        option {
                            key: "{method}",
                            value: "{method}",
                            selected: *method == selection.method,
                            "{method}"
                        }
                    }
                }
            }
            div { class: "filter-field",
                label { "Age:" }
                select { onchange: on_age,
                    for age in options.ages.iter() {
                        option {
                            key: "{age}",
                            value: "{age}",
                            selected: selection.age == Some(*age),
                            "{age}"
                        }
                    }
                }
            }
            div { class: "filter-field",
                label { "Last training period:" }
                select { onchange: on_period,
                    for period in options.training_periods.iter() {
                        option {
                            key: "{period}",
                            value: "{period}",
                            selected: selection.period == Some(*period),
                            "{period}"
                        }
                    }
                }
            }
            div { class: "filter-field wide",
                label { "Counties:" }
                div { {county_buttons} }
            }
        }
    }
}
