//! Raw file access plus the image loaders built on it.

use crate::data_structures::texture::{EnvironmentMap, TextureData};

/// Directory assets are read from on native targets.
///
/// Defaults to `./assets`, `ORRERY_ASSET_DIR` overrides it.
#[cfg(not(target_arch = "wasm32"))]
pub fn asset_root() -> std::path::PathBuf {
    std::env::var_os("ORRERY_ASSET_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::Path::new("./").join("assets"))
}

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no browser window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| anyhow::anyhow!("page origin is not readable"))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.error_for_status()?.text().await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = std::fs::read_to_string(asset_root().join(file_name))?;

    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.error_for_status()?.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = std::fs::read(asset_root().join(file_name))?;

    Ok(data)
}

pub async fn load_texture(file_name: &str) -> anyhow::Result<TextureData> {
    let data = load_binary(file_name).await?;
    TextureData::from_bytes(&data, file_name)
}

pub async fn load_environment(file_name: &str) -> anyhow::Result<EnvironmentMap> {
    let data = load_binary(file_name).await?;
    EnvironmentMap::from_hdr_bytes(&data, file_name)
}
