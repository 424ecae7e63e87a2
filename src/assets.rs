//! Sprite asset loading.
//!
//! Every sprite control has a "normal" and a "pressed" image, found in the
//! asset directory as `<control>.png` and `<control>_pressed.png`. Loading is
//! all-or-nothing: each file is attempted and each failure logged, then the
//! whole batch fails if any file did.

use egui::{ColorImage, TextureHandle, TextureOptions};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::controller::state::Control;

/// Controls drawn as sprites in sprite mode
pub const SPRITE_CONTROLS: [Control; 13] = [
    Control::A,
    Control::B,
    Control::X,
    Control::Y,
    Control::LeftBumper,
    Control::RightBumper,
    Control::Start,
    Control::Back,
    Control::Guide,
    Control::DPadUp,
    Control::DPadDown,
    Control::DPadLeft,
    Control::DPadRight,
];

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Unable to load image {path}: {source}")]
    Load {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("No sprite pair loaded for {0}")]
    MissingSprite(Control),

    #[error("Failed to load media: {failed} of {attempted} assets failed")]
    Batch { failed: usize, attempted: usize },
}

/// Uploaded image together with its pixel size. Freed when dropped.
#[derive(Clone)]
pub struct Texture {
    pub handle: TextureHandle,
    pub width: usize,
    pub height: usize,
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Texture")
            .field("name", &self.handle.name())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct SpritePair {
    pub normal: Texture,
    pub pressed: Texture,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpritePaths {
    pub normal: PathBuf,
    pub pressed: PathBuf,
}

/// Fixed list of asset files, one pair per sprite control
#[derive(Clone, Debug)]
pub struct AssetManifest {
    entries: Vec<(Control, SpritePaths)>,
}

impl AssetManifest {
    pub fn from_directory(dir: &Path) -> Self {
        let entries = SPRITE_CONTROLS
            .iter()
            .map(|control| {
                let name = control.asset_name();
                (
                    *control,
                    SpritePaths {
                        normal: dir.join(format!("{name}.png")),
                        pressed: dir.join(format!("{name}_pressed.png")),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[(Control, SpritePaths)] {
        &self.entries
    }

    /// Every file in load order, normal before pressed
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .flat_map(|(_, p)| [p.normal.clone(), p.pressed.clone()])
            .collect()
    }
}

/// Loaded sprites, validated to cover every sprite control
#[derive(Clone, Debug)]
pub struct TextureSet {
    sprites: BTreeMap<Control, SpritePair>,
}

impl TextureSet {
    pub fn from_pairs(sprites: BTreeMap<Control, SpritePair>) -> Result<Self, AssetError> {
        if let Some(missing) = SPRITE_CONTROLS.iter().find(|c| !sprites.contains_key(*c)) {
            return Err(AssetError::MissingSprite(*missing));
        }
        Ok(Self { sprites })
    }

    pub fn sprite(&self, control: Control, pressed: bool) -> Option<&Texture> {
        self.sprites.get(&control).map(|pair| {
            if pressed {
                &pair.pressed
            } else {
                &pair.normal
            }
        })
    }

    /// Number of controls with a sprite pair
    pub fn control_count(&self) -> usize {
        self.sprites.len()
    }
}

pub fn decode_image(path: &Path) -> Result<ColorImage, AssetError> {
    let image = image::open(path)
        .map_err(|source| AssetError::Load {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

/// Runs `loader` on every path, even after failures.
///
/// Each failure is logged. Returns the loaded values in input order only if
/// all of them succeeded.
pub fn load_batch<T, F>(paths: &[PathBuf], mut loader: F) -> Result<Vec<T>, AssetError>
where
    F: FnMut(&Path) -> Result<T, AssetError>,
{
    let mut loaded = Vec::with_capacity(paths.len());
    let mut failed = 0;

    for path in paths {
        match loader(path) {
            Ok(value) => {
                debug!("Loaded {}", path.display());
                loaded.push(value);
            }
            Err(e) => {
                error!("{}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(AssetError::Batch {
            failed,
            attempted: paths.len(),
        });
    }
    Ok(loaded)
}

pub struct AssetLoader;

impl AssetLoader {
    /// Decodes and uploads every file of the manifest
    pub fn load(ctx: &egui::Context, manifest: &AssetManifest) -> Result<TextureSet, AssetError> {
        let paths = manifest.paths();
        info!("Loading {} sprite assets", paths.len());

        let textures = load_batch(&paths, |path| {
            let image = decode_image(path)?;
            let [width, height] = image.size;
            let handle = ctx.load_texture(path.display().to_string(), image, TextureOptions::LINEAR);
            Ok(Texture {
                handle,
                width,
                height,
            })
        })?;

        let mut textures = textures.into_iter();
        let mut sprites = BTreeMap::new();
        for (control, _) in manifest.entries() {
            match (textures.next(), textures.next()) {
                (Some(normal), Some(pressed)) => {
                    sprites.insert(*control, SpritePair { normal, pressed });
                }
                _ => return Err(AssetError::MissingSprite(*control)),
            }
        }

        let set = TextureSet::from_pairs(sprites)?;
        info!("Loaded sprites for {} controls", set.control_count());
        Ok(set)
    }
}
