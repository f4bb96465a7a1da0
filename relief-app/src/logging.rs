use bevy::app::App;
use bevy::log::{Level, LogPlugin};

/// Installs the global tracing subscriber. `RUST_LOG` overrides `filter`.
pub fn init_logging(level: Level) {
    let mut app = App::new();
    app.add_plugins(LogPlugin {
        level,
        filter: "tiff=warn,png=warn".to_string(),
    });
}
