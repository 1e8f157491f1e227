//! アップロード→処理→レビュー画面への遷移
//!
//! Idle → Uploading → Processing → Ready の一方向フロー。
//! 失敗時は Failed になり、ユーザーが手動で再実行できる（自動リトライはしない）。
//! Ready は終端で、以降の状態は遷移先の画面が持つ。

use crate::error::{Error, Result};
use crate::route::AppRoute;
use crate::transfer::ImageTransfer;
use crate::types::ProcessedResult;
use crate::upload::UploadFile;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Uploading,
    Processing { image_id: String },
    Ready(Box<ReviewHandoff>),
    Failed { message: String },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Uploading => "uploading",
            WorkflowState::Processing { .. } => "processing",
            WorkflowState::Ready(_) => "ready",
            WorkflowState::Failed { .. } => "failed",
        }
    }

    /// 通信中（操作不可）
    pub fn is_busy(&self) -> bool {
        matches!(self, WorkflowState::Uploading | WorkflowState::Processing { .. })
    }

    /// 実行ボタンのラベル
    pub fn action_label(&self) -> &'static str {
        match self {
            WorkflowState::Uploading => "Uploading...",
            WorkflowState::Processing { .. } => "Processing...",
            _ => "Translate Now",
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            WorkflowState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// レビュー画面への引き渡し（遷移先と処理結果）
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewHandoff {
    pub route: AppRoute,
    pub result: ProcessedResult,
}

impl ReviewHandoff {
    /// バックエンドの `redirect_url` が同じ画像のアプリ内ルートならそれを使い、なければエディタへ
    pub fn new(result: ProcessedResult) -> Self {
        let route = result
            .redirect_url
            .as_deref()
            .and_then(AppRoute::parse)
            .filter(|route| route.image_id() == Some(result.image_id.as_str()))
            .unwrap_or_else(|| AppRoute::editor(result.image_id.clone()));
        Self { route, result }
    }

    /// 必ずエディタへ遷移する
    pub fn to_editor(result: ProcessedResult) -> Self {
        Self {
            route: AppRoute::editor(result.image_id.clone()),
            result,
        }
    }

    pub fn image_id(&self) -> &str {
        &self.result.image_id
    }
}

/// 画面ローカルのワークフロー状態
#[derive(Debug, Clone, Default)]
pub struct ReviewWorkflow {
    state: WorkflowState,
}

impl ReviewWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    fn transition(&mut self, to: WorkflowState) -> Result<()> {
        use WorkflowState::*;

        let allowed = matches!(
            (&self.state, &to),
            (Idle | Failed { .. }, Idle)
                | (Idle | Failed { .. }, Uploading)
                | (Uploading, Processing { .. })
                | (Uploading, Failed { .. })
                | (Processing { .. }, Ready(_))
                | (Processing { .. }, Failed { .. })
        );
        if !allowed {
            return Err(Error::InvalidTransition {
                from: self.state.name(),
                to: to.name(),
            });
        }

        tracing::debug!(from = self.state.name(), to = to.name(), "workflow transition");
        self.state = to;
        Ok(())
    }

    /// 新しいファイルを選んだときなど、失敗状態から初期状態へ戻す
    pub fn reset(&mut self) -> Result<()> {
        self.transition(WorkflowState::Idle)
    }

    pub fn start_upload(&mut self) -> Result<()> {
        self.transition(WorkflowState::Uploading)
    }

    pub fn upload_succeeded(&mut self, image_id: String) -> Result<()> {
        self.transition(WorkflowState::Processing { image_id })
    }

    pub fn process_succeeded(&mut self, mut result: ProcessedResult) -> Result<ReviewHandoff> {
        if let WorkflowState::Processing { image_id } = &self.state {
            result.ensure_image_id(image_id);
        }
        let handoff = ReviewHandoff::new(result);
        self.transition(WorkflowState::Ready(Box::new(handoff.clone())))?;
        Ok(handoff)
    }

    pub fn fail(&mut self, error: &Error) -> Result<()> {
        self.transition(WorkflowState::Failed {
            message: error.to_string(),
        })
    }

    /// upload → process を順に実行
    ///
    /// 状態が変わるたびに `observe` を呼ぶ。検証エラーの場合は通信せず状態も変えない。
    pub async fn run<C: ImageTransfer>(
        &mut self,
        client: &C,
        file: &UploadFile,
        mut observe: impl FnMut(&WorkflowState),
    ) -> Result<ReviewHandoff> {
        file.validate()?;

        self.start_upload()?;
        observe(&self.state);

        let image_id = match client.upload(file).await {
            Ok(image_id) => image_id,
            Err(e) => return Err(self.abort(e.into(), &mut observe)),
        };

        self.upload_succeeded(image_id.clone())?;
        observe(&self.state);

        let result = match client.process(&image_id).await {
            Ok(result) => result,
            Err(e) => return Err(self.abort(e.into(), &mut observe)),
        };

        let handoff = self.process_succeeded(result)?;
        observe(&self.state);
        Ok(handoff)
    }

    fn abort(&mut self, error: Error, observe: &mut impl FnMut(&WorkflowState)) -> Error {
        tracing::error!(step = self.state.name(), error = %error, "upload workflow failed");
        if self.fail(&error).is_ok() {
            observe(&self.state);
        }
        error
    }
}

/// 新しいワークフローで upload → process を実行
pub async fn upload_and_process<C: ImageTransfer>(
    client: &C,
    file: &UploadFile,
    observe: impl FnMut(&WorkflowState),
) -> Result<ReviewHandoff> {
    ReviewWorkflow::new().run(client, file, observe).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TransferError, ValidationError};
    use crate::testing::{sample_result, Call, MockTransfer};
    use futures::executor::block_on;

    fn jpeg(size: usize) -> UploadFile {
        UploadFile::new("page.jpg", "image/jpeg", vec![0u8; size])
    }

    fn run_collecting(client: &MockTransfer, file: &UploadFile) -> (Result<ReviewHandoff>, Vec<&'static str>) {
        let mut seen = vec![WorkflowState::Idle.name()];
        let result = block_on(upload_and_process(client, file, |state| seen.push(state.name())));
        (result, seen)
    }

    #[test]
    fn test_successful_upload_reaches_editor() {
        let client = MockTransfer::new();
        let (result, seen) = run_collecting(&client, &jpeg(2 * 1024 * 1024));

        let handoff = result.expect("workflow failed");
        assert_eq!(seen, vec!["idle", "uploading", "processing", "ready"]);
        assert_eq!(handoff.route, AppRoute::editor("img-1"));
        assert_eq!(handoff.result.translations.len(), 3);
        assert_eq!(
            client.calls(),
            vec![
                Call::Upload { file_name: "page.jpg".to_string(), size: 2 * 1024 * 1024 },
                Call::Process("img-1".to_string()),
            ]
        );
    }

    #[test]
    fn test_oversized_file_never_reaches_network() {
        let client = MockTransfer::new();
        let file = UploadFile::new("huge.png", "image/png", vec![0u8; 10 * 1024 * 1024]);
        let (result, seen) = run_collecting(&client, &file);

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::TooLarge { .. }))
        ));
        assert_eq!(seen, vec!["idle"]);
        assert!(client.calls().is_empty());
    }

    #[test]
    fn test_upload_failure() {
        let client = MockTransfer::new()
            .with_upload(Err(TransferError::Network("connection refused".to_string())));
        let (result, seen) = run_collecting(&client, &jpeg(100));

        assert!(matches!(result, Err(Error::Transfer(TransferError::Network(_)))));
        assert_eq!(seen, vec!["idle", "uploading", "failed"]);
        // processは呼ばれない
        assert_eq!(client.calls().len(), 1);
    }

    #[test]
    fn test_process_failure() {
        let client = MockTransfer::new().with_process(Err(TransferError::Status {
            status: 500,
            message: "Error processing image".to_string(),
        }));
        let mut workflow = ReviewWorkflow::new();
        let result = block_on(workflow.run(&client, &jpeg(100), |_| {}));

        assert!(result.is_err());
        assert_eq!(
            workflow.state().error_message(),
            Some("Server returned 500: Error processing image")
        );
    }

    #[test]
    fn test_failed_workflow_can_retry() {
        let failing = MockTransfer::new()
            .with_upload(Err(TransferError::Network("offline".to_string())));
        let mut workflow = ReviewWorkflow::new();
        assert!(block_on(workflow.run(&failing, &jpeg(100), |_| {})).is_err());

        let client = MockTransfer::new();
        let handoff = block_on(workflow.run(&client, &jpeg(100), |_| {})).unwrap();
        assert_eq!(handoff.image_id(), "img-1");
        assert_eq!(workflow.state().name(), "ready");
    }

    #[test]
    fn test_ready_is_terminal() {
        let mut workflow = ReviewWorkflow::new();
        block_on(workflow.run(&MockTransfer::new(), &jpeg(100), |_| {})).unwrap();

        assert!(matches!(workflow.start_upload(), Err(Error::InvalidTransition { .. })));
        assert!(matches!(workflow.reset(), Err(Error::InvalidTransition { .. })));
    }

    #[test]
    fn test_processing_requires_upload() {
        let mut workflow = ReviewWorkflow::new();
        let result = workflow.upload_succeeded("x".to_string());
        assert!(matches!(
            result,
            Err(Error::InvalidTransition { from: "idle", to: "processing" })
        ));
    }

    #[test]
    fn test_redirect_url_is_followed_for_same_image() {
        let mut result = sample_result("img-1", 1);
        result.redirect_url = Some("/view/img-1".to_string());
        assert_eq!(ReviewHandoff::new(result).route, AppRoute::view("img-1"));
    }

    #[test]
    fn test_foreign_redirect_url_is_ignored() {
        let mut result = sample_result("img-1", 1);
        result.redirect_url = Some("https://example.com/phish".to_string());
        assert_eq!(ReviewHandoff::new(result.clone()).route, AppRoute::editor("img-1"));

        result.redirect_url = Some("/view/other".to_string());
        assert_eq!(ReviewHandoff::new(result).route, AppRoute::editor("img-1"));
    }

    #[test]
    fn test_missing_image_id_filled_from_upload() {
        let processed = sample_result("", 1);
        let client = MockTransfer::new().with_process(Ok(processed));
        let (result, _) = run_collecting(&client, &jpeg(100));
        assert_eq!(result.unwrap().image_id(), "img-1");
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(WorkflowState::Idle.action_label(), "Translate Now");
        assert_eq!(WorkflowState::Uploading.action_label(), "Uploading...");
        assert!(WorkflowState::Processing { image_id: "a".into() }.is_busy());
        assert!(!WorkflowState::Failed { message: "x".into() }.is_busy());
    }
}
