use dioxus::prelude::*;

use evalboard_core::{DashboardSession, Phase};

use crate::api::{self, DashboardHandle};
use crate::components::{BarChart, FilterPanel, UploadForm};

static CSS: Asset = asset!("/assets/styles.css");

const ECHARTS_SRC: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

#[component]
pub fn App() -> Element {
    let session = use_signal(DashboardSession::new);
    let dashboard = use_context_provider(|| DashboardHandle::new(session, api::gateway()));

    // Color config is requested once, on mount
    use_effect(move || dashboard.apply(DashboardSession::start));

    let (phase, uploaded) = {
        let s = session.read();
        (s.phase(), s.is_uploaded())
    };

    rsx! {
        document::Stylesheet { href: CSS }
        document::Script { src: ECHARTS_SRC }

        div { class: "app",
            h1 { "Evaluation Results Dashboard" }

            if phase == Phase::Ready {
                FilterPanel {}
                BarChart {}
            } else if !uploaded {
                UploadForm {}
            } else {
                p { class: "hint", "Loading filter options..." }
            }
        }
    }
}
