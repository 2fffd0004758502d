use anyhow::bail;

use crate::{
    data_structures::model::{Bounds, ModelContent, ModelMesh},
    resources::texture::load_binary,
};

/// Resolves a buffer uri against the directory of the file that references it.
fn sibling_path(file_name: &str, uri: &str) -> String {
    match file_name.rfind('/') {
        Some(idx) => format!("{}/{}", &file_name[..idx], uri),
        None => uri.to_string(),
    }
}

pub async fn load_model_gltf(file_name: &str) -> anyhow::Result<ModelContent> {
    let bytes = load_binary(file_name).await?;
    let gltf = gltf::Gltf::from_slice(&bytes)?;

    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => match gltf.blob.as_deref() {
                Some(blob) => buffer_data.push(blob.to_vec()),
                None => bail!("{} references a binary chunk it does not have", file_name),
            },
            gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
                bail!("{}: embedded data uris are not supported", file_name)
            }
            gltf::buffer::Source::Uri(uri) => {
                let bin = load_binary(&sibling_path(file_name, uri)).await?;
                buffer_data.push(bin);
            }
        }
    }

    Ok(parse_gltf(file_name, &gltf, buffer_data))
}

fn vec3(value: Option<gltf::json::Value>) -> Option<[f32; 3]> {
    let value = value?;
    match value.as_array()?.as_slice() {
        [x, y, z] => Some([x.as_f64()? as f32, y.as_f64()? as f32, z.as_f64()? as f32]),
        _ => None,
    }
}

/// Summarizes a parsed glTF document; the buffers are kept as they are.
pub fn parse_gltf(source: &str, gltf: &gltf::Gltf, buffers: Vec<Vec<u8>>) -> ModelContent {
    let meshes = gltf
        .meshes()
        .map(|mesh| {
            let mut model_mesh = ModelMesh {
                name: mesh
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("mesh{}", mesh.index())),
                primitives: 0,
                vertex_count: 0,
                index_count: 0,
                bounds: None,
            };
            for primitive in mesh.primitives() {
                model_mesh.primitives += 1;
                if let Some(positions) = primitive.get(&gltf::Semantic::Positions) {
                    model_mesh.vertex_count += positions.count();
                    let bounds = vec3(positions.min())
                        .zip(vec3(positions.max()))
                        .map(|(min, max)| Bounds { min, max });
                    model_mesh.bounds = match (model_mesh.bounds, bounds) {
                        (Some(a), Some(b)) => Some(a.union(b)),
                        (a, b) => a.or(b),
                    };
                }
                model_mesh.index_count += primitive.indices().map_or(0, |i| i.count());
            }
            model_mesh
        })
        .collect();

    ModelContent {
        source: source.to_string(),
        meshes,
        node_count: gltf.nodes().count(),
        buffers,
    }
}
