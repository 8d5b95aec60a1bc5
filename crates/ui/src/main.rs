#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "nowline",
        options,
        Box::new(|cc| Ok(Box::new(nowline_ui::NowlineApp::new(cc)?))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}

#[cfg(target_arch = "wasm32")]
fn main() {}
