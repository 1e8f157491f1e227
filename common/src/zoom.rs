//! ズーム・全画面コントローラ
//!
//! ズーム率は [50, 200] の整数パーセントで、常に5の倍数。100が等倍。
//! 描画用の値（拡大率、スクロール領域の大きさ、中央寄せのスクロール位置）は都度計算する。

pub const ZOOM_MIN: u32 = 50;
pub const ZOOM_MAX: u32 = 200;
pub const ZOOM_DEFAULT: u32 = 100;
/// ボタン1回分の増減
pub const ZOOM_STEP: u32 = 10;
/// スライダーの刻み（ズーム率は常にこの倍数）
pub const ZOOM_QUANTUM: u32 = 5;

/// 5の倍数に丸めてから [50, 200] に収める
///
/// 丸めは .5 を切り上げる（`Math.round` と同じ）
pub fn normalize_zoom(value: f64) -> u32 {
    if !value.is_finite() {
        return ZOOM_DEFAULT;
    }
    let quantum = f64::from(ZOOM_QUANTUM);
    let snapped = (value / quantum + 0.5).floor() * quantum;
    snapped.clamp(f64::from(ZOOM_MIN), f64::from(ZOOM_MAX)) as u32
}

/// 全画面の切替要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenRequest {
    Enter,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomController {
    level: u32,
    fullscreen: bool,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self {
            level: ZOOM_DEFAULT,
            fullscreen: false,
        }
    }
}

impl ZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn zoom_in(&mut self) -> u32 {
        self.set_level(f64::from(self.level + ZOOM_STEP))
    }

    pub fn zoom_out(&mut self) -> u32 {
        self.set_level(f64::from(self.level) - f64::from(ZOOM_STEP))
    }

    pub fn reset(&mut self) {
        self.level = ZOOM_DEFAULT;
    }

    /// 任意の値を設定（スライダー入力など）
    pub fn set_level(&mut self, value: f64) -> u32 {
        self.level = normalize_zoom(value);
        self.level
    }

    pub fn can_zoom_in(&self) -> bool {
        self.level < ZOOM_MAX
    }

    pub fn can_zoom_out(&self) -> bool {
        self.level > ZOOM_MIN
    }

    pub fn is_default(&self) -> bool {
        self.level == ZOOM_DEFAULT
    }

    pub fn scale(&self) -> f64 {
        f64::from(self.level) / 100.0
    }

    pub fn layout(&self) -> ZoomLayout {
        ZoomLayout {
            scale: self.scale(),
            content_percent: self.level.max(ZOOM_DEFAULT),
        }
    }

    /// ズーム変更後にスクロール位置を中央へ戻すべきか
    pub fn needs_recenter(&self) -> bool {
        !self.is_default()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// 全画面を切り替える
    ///
    /// `presented` は実際に全画面表示中かどうか（document.fullscreenElement の有無）。
    /// フラグは要求に合わせて先に更新し、実際の状態は [`sync_fullscreen`](Self::sync_fullscreen) で追従する。
    pub fn toggle_fullscreen(&mut self, presented: bool) -> FullscreenRequest {
        if presented {
            self.fullscreen = false;
            FullscreenRequest::Exit
        } else {
            self.fullscreen = true;
            FullscreenRequest::Enter
        }
    }

    /// Esc キーやブラウザ操作による全画面解除に追従
    pub fn sync_fullscreen(&mut self, presented: bool) {
        self.fullscreen = presented;
    }
}

/// ズーム時の描画パラメータ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLayout {
    /// 画像に掛ける拡大率
    pub scale: f64,
    /// スクロール領域の大きさ（ビューポートに対する%）。100%以下のズームでは100のまま
    pub content_percent: u32,
}

impl ZoomLayout {
    pub fn container_style(&self) -> String {
        format!(
            "width: {pct}%; height: {pct}%;",
            pct = self.content_percent
        )
    }

    pub fn image_style(&self) -> String {
        format!(
            "transform: scale({}); transition: transform 0.2s ease; max-width: 100%; max-height: 100%;",
            self.scale
        )
    }
}

/// スクロール位置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOffset {
    pub left: f64,
    pub top: f64,
}

/// スクロール領域の中央を表示するためのスクロール位置
pub fn centered_scroll(
    scroll_width: f64,
    scroll_height: f64,
    client_width: f64,
    client_height: f64,
) -> ScrollOffset {
    ScrollOffset {
        left: ((scroll_width - client_width) / 2.0).max(0.0),
        top: ((scroll_height - client_height) / 2.0).max(0.0),
    }
}
