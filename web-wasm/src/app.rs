//! メインアプリケーションコンポーネント

use crate::api::BrowserTransfer;
use crate::components::header::Header;
use crate::config::client_config;
use crate::pages::{editor::EditorPage, home::HomePage, view::ViewPage};
use crate::theme::provide_theme;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use mangalens_common::{ReviewHandoff, SaveOutcome, SaveRequest};

/// 画面遷移で引き渡す処理結果
///
/// 直近の1件だけを持つ。別の画像の結果は渡さない
#[derive(Clone, Copy)]
pub struct HandoffSlot(RwSignal<Option<ReviewHandoff>>);

impl HandoffSlot {
    pub fn put(&self, handoff: ReviewHandoff) {
        tracing::debug!(image_id = handoff.image_id(), route = %handoff.route, "handing off result");
        self.0.set(Some(handoff));
    }

    /// 保存結果を引き継ぎ中の結果に反映する
    pub fn record_save(&self, request: &SaveRequest, outcome: &SaveOutcome) {
        self.0.try_update(|slot| {
            if let Some(handoff) = slot
                .as_mut()
                .filter(|handoff| handoff.image_id() == request.image_id)
            {
                handoff.result.apply_save(request, outcome);
            }
        });
    }

    pub fn get_for(&self, image_id: &str) -> Option<ReviewHandoff> {
        self.0.with_untracked(|slot| {
            slot.as_ref()
                .filter(|handoff| handoff.image_id() == image_id)
                .cloned()
        })
    }
}

pub fn use_handoff() -> HandoffSlot {
    expect_context::<HandoffSlot>()
}

pub fn use_transfer() -> BrowserTransfer {
    expect_context::<BrowserTransfer>()
}

#[component]
pub fn App() -> impl IntoView {
    provide_theme();
    provide_context(BrowserTransfer::new(&client_config()));
    provide_context(HandoffSlot(RwSignal::new(None)));

    view! {
        <Router>
            <div class="container">
                <Header />
                <main>
                    <Routes fallback=|| view! { <p class="text-muted">"Page not found"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/editor/:image_id") view=EditorPage />
                        <Route path=path!("/view/:image_id") view=ViewPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
