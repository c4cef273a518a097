//! Reading image attachments from disk

use std::path::Path;

use devportal_core::prelude::*;
use devportal_core::ImageAttachment;

/// Outcome of reading one batch of image paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedImages {
    pub loaded: Vec<ImageAttachment>,
    /// Paths that could not be read
    pub failed: Vec<String>,
    /// Number of paths in the batch
    pub submitted: usize,
}

/// Read `paths` in order, stopping once `limit` images have been read.
///
/// Unreadable paths are reported in `failed` and skipped.
pub async fn load_images(paths: Vec<String>, limit: usize) -> LoadedImages {
    let mut result = LoadedImages {
        submitted: paths.len(),
        ..Default::default()
    };

    for raw in paths {
        if result.loaded.len() >= limit {
            break;
        }
        match read_image(Path::new(&raw)).await {
            Ok(image) => {
                debug!("Loaded image {} ({} bytes)", raw, image.bytes.len());
                result.loaded.push(image);
            }
            Err(e) => {
                warn!("Could not read image {}: {}", raw, e);
                result.failed.push(raw);
            }
        }
    }

    result
}

async fn read_image(path: &Path) -> Result<ImageAttachment> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    Ok(ImageAttachment {
        mime_type: devportal_core::mime_for_path(path).to_string(),
        file_name,
        bytes,
    })
}
