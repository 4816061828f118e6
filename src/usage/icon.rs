use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::constants::ICON_MAX_DIM;
use crate::host::{HostResult, UsageHost};

/// Base64-encoded PNG of an app's icon, downscaled to at most
/// 96x96. Degrades to an empty string on any failure; a missing icon
/// never costs the caller its report entry.
pub fn render_icon(host: &dyn UsageHost, package: &str) -> String {
    match encode_icon(host, package) {
        Ok(encoded) => encoded,
        Err(err) => {
            log::debug!("icon unavailable for {package}: {err}");
            String::new()
        }
    }
}

fn encode_icon(host: &dyn UsageHost, package: &str) -> HostResult<String> {
    let bytes = host.app_icon_png(package)?;
    let img = image::load_from_memory(&bytes)?;
    // thumbnail preserves aspect ratio, so neither side can exceed the cap.
    let img = if img.width() > ICON_MAX_DIM || img.height() > ICON_MAX_DIM {
        img.thumbnail(ICON_MAX_DIM, ICON_MAX_DIM)
    } else {
        img
    };
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(STANDARD.encode(buf.into_inner()))
}
