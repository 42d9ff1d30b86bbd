//! Inline asset embedding

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};
use uuid::Uuid;

lazy_static! {
    static ref ASSET_REGEX: Regex =
        Regex::new(r#"(?i)(\s(?:src|background)\s*=\s*|url\()(["']?)([^"')\s>]+)"#).unwrap();
    static ref SCHEME_REGEX: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").unwrap();
}

/// A file referenced from an HTML body, to be sent as an inline part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAsset {
    /// The `Content-ID` the body now refers to
    pub content_id: String,

    /// The file on disk
    pub path: PathBuf,
}

/// Rewrites relative `src=`, `background=` and `url(` references that resolve
/// to a file under `base_path` into `cid:` URLs.
///
/// References are percent-decoded before lookup. Absolute paths, anchors, URLs
/// with a scheme, references leaving `base_path` and references to missing
/// files are left untouched. A file referenced twice is embedded once.
pub fn embed_assets(html: &str, base_path: &Path) -> (String, Vec<InlineAsset>) {
    let mut assets: Vec<InlineAsset> = Vec::new();

    let Ok(base_path) = base_path.canonicalize() else {
        return (html.to_string(), assets);
    };

    let rewritten = ASSET_REGEX.replace_all(html, |caps: &Captures<'_>| {
        let Some(path) = resolve(&caps[3], &base_path) else {
            return caps[0].to_string();
        };

        let content_id = match assets.iter().find(|asset| asset.path == path) {
            Some(asset) => asset.content_id.clone(),
            None => {
                let content_id = format!("{}@templated-email", Uuid::now_v7().simple());
                assets.push(InlineAsset {
                    content_id: content_id.clone(),
                    path,
                });
                content_id
            }
        };

        format!("{}{}cid:{}", &caps[1], &caps[2], content_id)
    });

    (rewritten.into_owned(), assets)
}

/// The file `reference` names below the canonical `base_path`, if any
fn resolve(reference: &str, base_path: &Path) -> Option<PathBuf> {
    if is_external(reference) {
        return None;
    }

    let decoded = percent_decode_str(reference).decode_utf8().ok()?;
    let relative = Path::new(decoded.as_ref());

    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }

    // Symlinks may still point outside the base.
    let path = fs::canonicalize(base_path.join(relative)).ok()?;

    (path.starts_with(base_path) && path.is_file()).then_some(path)
}

fn is_external(reference: &str) -> bool {
    reference.starts_with(['/', '\\', '#']) || SCHEME_REGEX.is_match(reference)
}
