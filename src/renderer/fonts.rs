//! Font loading and discovery

use ember_smoke::{Error, Result};
use femtovg::{Canvas, FontId, renderer::OpenGl};

/// Load a HUD font with fallbacks
pub fn load_fonts(canvas: &mut Canvas<OpenGl>) -> Result<Vec<FontId>> {
    let mut fonts = Vec::new();

    let sans_paths = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/ubuntu/Ubuntu-R.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/System/Library/Fonts/Helvetica.ttc",
        "C:\\Windows\\Fonts\\segoeui.ttf",
    ];

    for path in &sans_paths {
        if let Ok(font) = canvas.add_font(path) {
            log::debug!("loaded font {path}");
            fonts.push(font);
            break;
        }
    }

    // Last resort: any TTF one directory below the system font root
    if fonts.is_empty() {
        if let Ok(entries) = std::fs::read_dir("/usr/share/fonts/truetype") {
            'search: for entry in entries.flatten() {
                let Ok(sub_entries) = std::fs::read_dir(entry.path()) else {
                    continue;
                };
                for sub_entry in sub_entries.flatten() {
                    let path = sub_entry.path();
                    if path.extension().is_some_and(|e| e == "ttf") {
                        if let Ok(font) = canvas.add_font(&path) {
                            log::debug!("loaded fallback font {}", path.display());
                            fonts.push(font);
                            break 'search;
                        }
                    }
                }
            }
        }
    }

    if fonts.is_empty() {
        return Err(Error::Font(
            "no usable font found; install dejavu-fonts or liberation-fonts".to_string(),
        ));
    }

    Ok(fonts)
}
