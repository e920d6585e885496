/// Example: unfold the stairs net from a closed cube
///
/// Usage: cargo run --example stairs
use foldnet_core::{FoldDirection, NetPattern, SceneConfig, ShapeKind};
use foldnet_terminal::TerminalApp;
use std::io;

fn main() -> io::Result<()> {
    let mut config = SceneConfig::default();
    config.select_shape(ShapeKind::Cube);
    config.select_pattern(NetPattern::Net10);
    config.set_progress(0.0);
    config.auto_rotate = true;

    println!("Unfolding {} (press F to fold back, Q to quit)...", config.pattern);
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(config)?;
    app.animator_mut().play(FoldDirection::Unfold);
    app.run()
}
