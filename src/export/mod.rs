//! Export of volume metadata
//!
//! Converts decoded banners to standard RGBA images for saving as PNG, and
//! collects every accessor of a [`Volume`] into a serializable report.

use image::{Rgba, RgbaImage};
use serde::Serialize;
use std::path::Path;

use crate::banner::{BannerImage, LocalizedStrings};
use crate::disc::{BlobType, Country, Partition, Platform, Region, Volume, NO_UID};

/// Result of a banner export
#[derive(Debug)]
pub struct ExportResult {
    /// Path where the image was saved
    pub output_path: String,
    /// Image dimensions
    pub size: (u32, u32),
}

/// Everything readable from one volume
#[derive(Debug, Clone, Serialize)]
pub struct VolumeReport {
    pub game_id: String,
    pub internal_name: String,
    pub maker_id: String,
    pub region: Option<Region>,
    pub country: Option<Country>,
    pub revision: Option<u16>,
    pub disc_number: Option<u8>,
    pub apploader_date: String,
    pub platform: Platform,
    pub blob_type: BlobType,
    pub size: u64,
    pub raw_size: u64,
    pub short_names: LocalizedStrings,
    pub long_names: LocalizedStrings,
    pub short_makers: LocalizedStrings,
    pub long_makers: LocalizedStrings,
    pub descriptions: LocalizedStrings,
    pub banner_width: u32,
    pub banner_height: u32,
}

/// Collect a report from every accessor of `volume`
pub fn volume_report(volume: &dyn Volume) -> VolumeReport {
    let banner = volume.banner();
    VolumeReport {
        game_id: volume.game_id(Partition::NONE),
        internal_name: volume.internal_name(Partition::NONE),
        maker_id: volume.maker_id(Partition::NONE),
        region: volume.region(),
        country: volume.country(Partition::NONE),
        revision: volume.revision(Partition::NONE),
        disc_number: volume.disc_number(Partition::NONE),
        apploader_date: volume.apploader_date(Partition::NONE),
        platform: volume.platform(),
        blob_type: volume.blob_type(),
        size: volume.size(),
        raw_size: volume.raw_size(),
        short_names: volume.short_names(),
        long_names: volume.long_names(),
        short_makers: volume.short_makers(),
        long_makers: volume.long_makers(),
        descriptions: volume.descriptions(),
        banner_width: banner.width,
        banner_height: banner.height,
    }
}

/// Convert packed `0xAARRGGBB` banner pixels to an RGBA image
///
/// Returns `None` for an empty banner.
pub fn banner_to_rgba(banner: &BannerImage) -> Option<RgbaImage> {
    if banner.is_empty() {
        return None;
    }

    let width = banner.width;
    Some(RgbaImage::from_fn(banner.width, banner.height, |x, y| {
        let argb = banner.pixels[(y * width + x) as usize];
        let [a, r, g, b] = argb.to_be_bytes();
        Rgba([r, g, b, a])
    }))
}

/// File name for a disc's exported banner
///
/// Built from the game ID with anything outside `[A-Za-z0-9_-]` replaced, so
/// the name never leaves the output directory. Discs without a readable ID
/// fall back to the image's file stem.
pub fn banner_file_name(game_id: &str, image_path: &Path) -> String {
    fn clean(name: &str) -> String {
        name.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect()
    }

    let stem = if game_id.is_empty() || game_id == NO_UID {
        image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        game_id.to_string()
    };

    if stem.is_empty() {
        return format!("{}.png", NO_UID);
    }
    format!("{}.png", clean(&stem))
}

/// Save a banner as PNG
pub fn export_banner_png<P: AsRef<Path>>(
    banner: &BannerImage,
    output_path: P,
) -> Result<ExportResult, String> {
    let rgba = banner_to_rgba(banner).ok_or_else(|| "Banner image is empty".to_string())?;

    let output_path = output_path.as_ref();
    rgba.save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| format!("Failed to write {}: {}", output_path.display(), e))?;

    Ok(ExportResult {
        output_path: output_path.display().to_string(),
        size: rgba.dimensions(),
    })
}
