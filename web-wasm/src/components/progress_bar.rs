//! ワークフロー進捗コンポーネント

use leptos::prelude::*;
use mangalens_common::WorkflowState;

/// 完了までのおおよその割合（upload → process の2段階）
fn progress_of(state: &WorkflowState) -> f32 {
    match state {
        WorkflowState::Idle | WorkflowState::Failed { .. } => 0.0,
        WorkflowState::Uploading => 0.25,
        WorkflowState::Processing { .. } => 0.6,
        WorkflowState::Ready(_) => 1.0,
    }
}

fn status_text(state: &WorkflowState) -> &'static str {
    match state {
        WorkflowState::Uploading => "Uploading image...",
        WorkflowState::Processing { .. } => "Detecting and translating text...",
        WorkflowState::Ready(_) => "Done",
        _ => "",
    }
}

#[component]
pub fn ProgressBar(state: RwSignal<WorkflowState>) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", state.with(progress_of) * 100.0)
                />
            </div>
            <p class="progress-text">{move || state.with(status_text)}</p>
        </div>
    }
}
