//! 対話式セッション
//!
//! 画像パスの入力（ファイル選択）→ 送信 → 結果表示 を繰り返す。
//! 履歴はこのプロセスの間だけ保持し、終了時に表示して捨てる。

use crate::classifier::Classifier;
use crate::controller::{is_local_rejection, SubmissionController};
use crate::error::{LungVisionError, Result};
use crate::loader::{image_dimensions, normalize_input_path, read_image_file};
use crate::render::{format_size, render_history, render_view};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use lungvision_common::{view, Classification, FileSelection, SelectionOrigin};
use std::path::Path;
use std::time::Duration;

/// 対話アクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// 画像を選ぶ（入力されたパス）
    Choose(String),
    /// 選択中の画像を送信
    Submit,
    /// 履歴を表示
    History,
    /// 終了
    Quit,
}

/// 入力文字列をアクションに変換
pub fn parse_action(input: &str) -> SessionAction {
    match input.trim() {
        "" | "c" | "C" => SessionAction::Submit,
        "h" | "H" => SessionAction::History,
        "q" | "Q" => SessionAction::Quit,
        other => match normalize_input_path(other) {
            Some(path) => SessionAction::Choose(path.to_string()),
            None => SessionAction::Submit,
        },
    }
}

/// パスを読み込んで選択する
///
/// 読み込めない・画像でない場合はメッセージを出して false を返す（セッションは続行）。
pub fn choose_image<C: Classifier>(
    controller: &SubmissionController<C>,
    path: &Path,
    origin: SelectionOrigin,
) -> Result<bool> {
    let file = match read_image_file(path) {
        Ok(file) => file,
        Err(LungVisionError::FileNotFound(p)) => {
            println!("✖ ファイルが見つかりません: {}", p);
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    let dimensions = image_dimensions(&file.bytes);
    match controller.select(FileSelection::single(origin, file)) {
        Ok(image) => {
            let dims = dimensions
                .map(|(w, h)| format!(", {}x{}", w, h))
                .unwrap_or_default();
            println!(
                "✔ 画像を選択: {} ({}{}, {})",
                image.name(),
                image.content_type(),
                dims,
                format_size(image.len())
            );
            Ok(true)
        }
        Err(e) => {
            println!("✖ {}", e);
            Ok(false)
        }
    }
}

/// スピナーを出しながら送信
pub async fn submit_with_spinner<C: Classifier>(
    controller: &SubmissionController<C>,
) -> lungvision_common::Result<Classification> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(view::BUSY_LABEL);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = controller.submit().await;
    spinner.finish_and_clear();
    result
}

/// 1枚だけ選択して送信し、結果を表示
pub async fn classify_once<C: Classifier>(
    controller: &SubmissionController<C>,
    path: &Path,
    json: bool,
) -> Result<Classification> {
    if !choose_image(controller, path, SelectionOrigin::Picker)? {
        return Err(LungVisionError::ImageLoad(path.display().to_string()));
    }

    let result = submit_with_spinner(controller).await;
    let view = controller.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("\n{}", render_view(&view));
    }
    Ok(result?)
}

/// 対話式セッションを実行
pub async fn run_interactive_session<C: Classifier>(
    controller: &SubmissionController<C>,
    json: bool,
) -> Result<()> {
    println!("🫁 LungVision AI - 対話セッション");
    println!("---");
    println!("操作: [パス]画像を選択 [Enter/c]分類 [h]履歴 [q]終了");
    println!("---\n");

    loop {
        println!("{}\n", render_view(&controller.view()));

        let input: String = Input::new()
            .with_prompt("画像パス または コマンド")
            .allow_empty(true)
            .interact_text()?;

        match parse_action(&input) {
            SessionAction::Choose(path) => {
                choose_image(controller, Path::new(&path), SelectionOrigin::Picker)?;
            }
            SessionAction::Submit => match submit_with_spinner(controller).await {
                Ok(classification) => println!("✔ 分類結果: {}", classification),
                Err(e) if is_local_rejection(&e) => println!("⚠ {}", e),
                // 失敗はビューのエラー表示に出る
                Err(_) => {}
            },
            SessionAction::History => {
                println!("{}", render_history(&controller.view().history));
            }
            SessionAction::Quit => break,
        }
        println!();
    }

    let history = controller.view().history;
    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
    } else {
        println!("{}", render_history(&history));
    }
    println!("\n✅ セッション終了（履歴は保存されません）");

    Ok(())
}
