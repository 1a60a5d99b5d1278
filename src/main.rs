use anyhow::Context;
use clap::Parser;
use lungvision_common::{ImageSource, Session};
use lungvision_rust::{cli, config, interactive, HttpClassifier, SubmissionController};
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Classify { image, json } => {
            let mut config = config.effective();
            if let Some(endpoint) = cli.endpoint {
                config.set_endpoint(endpoint)?;
            }
            let controller = build_controller(&config)?;
            interactive::classify_once(&controller, &image, json)
                .await
                .with_context(|| format!("{} の分類に失敗しました", image.display()))?;
        }

        Commands::Session { json } => {
            let mut config = config.effective();
            if let Some(endpoint) = cli.endpoint {
                config.set_endpoint(endpoint)?;
            }
            let controller = build_controller(&config)?;
            interactive::run_interactive_session(&controller, json).await?;
        }

        Commands::Config {
            set_endpoint,
            set_field_name,
            set_timeout,
            clear_timeout,
            set_max_upload_bytes,
            show,
        } => {
            let mut changed = false;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                changed = true;
            }
            if let Some(field_name) = set_field_name {
                config.set_field_name(field_name)?;
                changed = true;
            }
            if let Some(seconds) = set_timeout {
                config.timeout_seconds = Some(seconds);
                changed = true;
            }
            if clear_timeout {
                config.timeout_seconds = None;
                changed = true;
            }
            if let Some(limit) = set_max_upload_bytes {
                config.max_upload_bytes = limit;
                changed = true;
            }

            if changed {
                config.save().context("設定ファイルの保存に失敗しました")?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint);
                println!("  フィールド名: {}", config.field_name);
                println!(
                    "  タイムアウト: {}",
                    config
                        .timeout_seconds
                        .map(|s| format!("{}秒", s))
                        .unwrap_or_else(|| "なし".into())
                );
                println!(
                    "  アップロード上限: {}",
                    config
                        .upload_limit()
                        .map(|b| format!("{} bytes", b))
                        .unwrap_or_else(|| "なし".into())
                );
            }
        }
    }

    Ok(())
}

fn build_controller(config: &Config) -> anyhow::Result<SubmissionController<HttpClassifier>> {
    let classifier = HttpClassifier::from_config(config)?;
    tracing::debug!(endpoint = %classifier.endpoint(), "分類クライアントを初期化");
    let session = Session::new(ImageSource::new(config.upload_limit()));
    Ok(SubmissionController::new(session, classifier))
}
