pub mod controller;
pub mod panel;
pub mod settings;
pub mod wait;

pub use controller::{OverlayController, PanelAction};
pub use panel::{FieldUpdate, Notice, PanelSink, UpdateOrigin};
pub use settings::{EnvSettings, SettingsStore, StaticSettings};
pub use wait::{wait_for, WaitConfig};
