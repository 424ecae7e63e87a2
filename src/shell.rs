//! Application shell: startup sequence, frame loop and teardown.
//!
//! Startup runs `input + display -> assets -> loop`, stopping at the first
//! failing stage. All resources are owned values, so whatever was acquired is
//! released when its owner goes out of scope, on every exit path.

use eframe::egui;
use tracing::{debug, info, warn};

use crate::assets::{AssetError, AssetLoader, AssetManifest, TextureSet};
use crate::config::{Config, DisplayMode};
use crate::controller::input_source::{InputError, InputSource, Polling};
use crate::controller::state::ControllerState;
use crate::controller::translator::{EventTranslator, TranslatorSettings};
use crate::render::layout::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::render::{painter, FrameBuilder};

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Assets(#[from] AssetError),

    #[error("Window error: {0}")]
    Window(String),

    #[error("Invalid lifecycle transition from {from:?} to {to:?}")]
    InvalidTransition { from: Phase, to: Phase },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Uninitialized,
    DisplayReady,
    AssetsReady,
    Running,
    ShuttingDown,
    Terminated,
}

impl Phase {
    fn next(self) -> Option<Phase> {
        match self {
            Phase::Uninitialized => Some(Phase::DisplayReady),
            Phase::DisplayReady => Some(Phase::AssetsReady),
            Phase::AssetsReady => Some(Phase::Running),
            Phase::Running => Some(Phase::ShuttingDown),
            Phase::ShuttingDown => Some(Phase::Terminated),
            Phase::Terminated => None,
        }
    }
}

/// Forward-only application phase tracker.
///
/// Dropping a lifecycle that has not terminated shuts it down.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Moves exactly one step forward
    pub fn advance(&mut self, to: Phase) -> Result<(), ShellError> {
        if self.phase.next() != Some(to) {
            return Err(ShellError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        debug!("Lifecycle {:?} -> {:?}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    /// Ends the lifecycle from any phase.
    ///
    /// Returns `false` if it had already terminated.
    pub fn shutdown(&mut self) -> bool {
        if self.phase == Phase::Terminated {
            return false;
        }
        if self.phase != Phase::ShuttingDown {
            info!("Shutting down from {:?}", self.phase);
            self.phase = Phase::ShuttingDown;
        }
        self.phase = Phase::Terminated;
        info!("Terminated");
        true
    }

    /// Leaves the frame loop: `Running -> ShuttingDown -> Terminated`
    pub fn exit(&mut self) -> Result<(), ShellError> {
        self.advance(Phase::ShuttingDown)?;
        self.shutdown();
        Ok(())
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Frame loop state owned by eframe while the window is open
pub struct PadviewApp {
    input: InputSource<Polling>,
    translator: EventTranslator,
    state: ControllerState,
    frame_builder: FrameBuilder,
    textures: Option<TextureSet>,
    // Also shut down on drop if eframe never calls on_exit
    lifecycle: Lifecycle,
}

impl eframe::App for PadviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in self.input.drain() {
            self.translator.apply(&mut self.state, &event);
        }

        let list = self.frame_builder.build(&self.state);
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let origin = ui.max_rect().min.to_vec2();
                painter::paint(ui.painter(), origin, &list, self.textures.as_ref());
            });

        // Redraw continuously, presentation is paced by vsync
        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.lifecycle.exit() {
            warn!("{}", e);
            self.lifecycle.shutdown();
        }
    }
}

pub fn run(config: Config) -> Result<(), ShellError> {
    let mut lifecycle = Lifecycle::new();

    let input = InputSource::create()?.open_first()?;

    let title = if config.window.title_from_device {
        input.device_name().to_string()
    } else {
        config.window.title.clone()
    };

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_title(title.clone())
        .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
        .with_resizable(false);
    native_options.vsync = true;

    let frame_builder = FrameBuilder::from_config(&config);
    let translator = EventTranslator::new(TranslatorSettings {
        log_deadzone: config.input.log_deadzone,
    });
    let mode = config.display.mode;
    let asset_dir = config.assets.directory.clone();

    info!("Opening window \"{}\"", title);
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_theme(egui::Theme::Light);
            lifecycle.advance(Phase::DisplayReady)?;

            let textures = match mode {
                DisplayMode::Sprites => {
                    let manifest = AssetManifest::from_directory(&asset_dir);
                    Some(AssetLoader::load(&cc.egui_ctx, &manifest)?)
                }
                DisplayMode::Outline => None,
            };
            lifecycle.advance(Phase::AssetsReady)?;

            lifecycle.advance(Phase::Running)?;
            Ok(Box::new(PadviewApp {
                input,
                translator,
                state: ControllerState::new(),
                frame_builder,
                textures,
                lifecycle,
            }))
        }),
    )
    .map_err(|e| ShellError::Window(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_phases_advance_in_order() {
        let mut lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.phase(), Phase::Uninitialized);
        lifecycle.advance(Phase::DisplayReady).unwrap();
        lifecycle.advance(Phase::AssetsReady).unwrap();
        lifecycle.advance(Phase::Running).unwrap();
        assert_eq!(lifecycle.phase(), Phase::Running);
    }

    #[test]
    fn test_skipping_or_going_back_is_rejected() {
        let mut lifecycle = Lifecycle::new();
        assert!(matches!(
            lifecycle.advance(Phase::Running),
            Err(ShellError::InvalidTransition {
                from: Phase::Uninitialized,
                to: Phase::Running
            })
        ));

        lifecycle.advance(Phase::DisplayReady).unwrap();
        assert!(lifecycle.advance(Phase::Uninitialized).is_err());
        assert!(lifecycle.advance(Phase::DisplayReady).is_err());
        assert_eq!(lifecycle.phase(), Phase::DisplayReady);
    }

    #[test]
    fn test_shutdown_from_running_terminates_once() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.advance(Phase::DisplayReady).unwrap();
        lifecycle.advance(Phase::AssetsReady).unwrap();
        lifecycle.advance(Phase::Running).unwrap();

        assert!(lifecycle.shutdown());
        assert_eq!(lifecycle.phase(), Phase::Terminated);
        assert!(!lifecycle.shutdown());
        assert!(lifecycle.advance(Phase::Running).is_err());
    }

    #[test]
    fn test_exit_from_running_passes_through_shutting_down() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.advance(Phase::DisplayReady).unwrap();
        lifecycle.advance(Phase::AssetsReady).unwrap();
        lifecycle.advance(Phase::Running).unwrap();

        lifecycle.exit().unwrap();
        assert_eq!(lifecycle.phase(), Phase::Terminated);
        // Drop after a clean exit has nothing left to do
        assert!(!lifecycle.shutdown());
    }

    #[test]
    fn test_exit_before_running_is_rejected() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.advance(Phase::DisplayReady).unwrap();
        assert!(matches!(
            lifecycle.exit(),
            Err(ShellError::InvalidTransition {
                from: Phase::DisplayReady,
                to: Phase::ShuttingDown
            })
        ));
        assert_eq!(lifecycle.phase(), Phase::DisplayReady);
    }

    #[test]
    fn test_shutdown_before_startup_is_safe() {
        let mut lifecycle = Lifecycle::new();
        assert!(lifecycle.shutdown());
        assert_eq!(lifecycle.phase(), Phase::Terminated);
    }

    #[test]
    fn test_phases_are_ordered() {
        assert!(Phase::Uninitialized < Phase::DisplayReady);
        assert!(Phase::Running < Phase::ShuttingDown);
        assert!(Phase::ShuttingDown < Phase::Terminated);
    }
}
