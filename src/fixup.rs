use crate::accessor;
use crate::root::{Index, Root};
use crate::validation::{Error as Reason, Path};

fn reject(path: Path, reason: Reason) -> crate::Error {
    crate::Error::Validation(vec![(path, reason)])
}

/// Bounds-checks an optional reference.
fn check<T>(
    index: Option<Index<T>>,
    len: usize,
    path: impl FnOnce() -> Path,
) -> Result<(), crate::Error> {
    match index {
        None => Ok(()),
        Some(index) if index.value() < len => Ok(()),
        Some(_) => Err(reject(path(), Reason::IndexOutOfBounds)),
    }
}

/// Bounds-checks a required reference.
fn require<T>(
    index: Option<Index<T>>,
    len: usize,
    path: impl FnOnce() -> Path,
) -> Result<(), crate::Error> {
    match index {
        None => Err(reject(path(), Reason::Missing)),
        Some(index) if index.value() < len => Ok(()),
        Some(_) => Err(reject(path(), Reason::IndexOutOfBounds)),
    }
}

/// Single post-pass over the decoded graph.
///
/// Converts the decode-time promise "references are raw indices" into the
/// post-parse guarantee "present references dereference within bounds":
/// every edge is checked against its owning array, parent back-links are
/// written (and claimed at most once), and accessor strides are resolved.
/// The first failure aborts the parse.
pub(crate) fn run(root: &mut Root) -> Result<(), crate::Error> {
    let accessors = root.accessors.len();
    let buffers = root.buffers.len();
    let buffer_views = root.buffer_views.len();
    let cameras = root.cameras.len();
    let images = root.images.len();
    let lights = root.lights.len();
    let materials = root.materials.len();
    let meshes = root.meshes.len();
    let nodes = root.nodes.len();
    let samplers = root.samplers.len();
    let scenes = root.scenes.len();
    let skins = root.skins.len();
    let textures = root.textures.len();

    for (i, mesh) in root.meshes.iter().enumerate() {
        for (j, primitive) in mesh.primitives.iter().enumerate() {
            let path = || {
                Path::new()
                    .field("meshes")
                    .index(i)
                    .field("primitives")
                    .index(j)
            };
            check(primitive.indices, accessors, || path().field("indices"))?;
            check(primitive.material, materials, || path().field("material"))?;
            for attribute in &primitive.attributes {
                require(Some(attribute.accessor), accessors, || {
                    path().field("attributes").key(&attribute.name)
                })?;
            }
            for (k, target) in primitive.targets.iter().enumerate() {
                for attribute in &target.attributes {
                    require(Some(attribute.accessor), accessors, || {
                        path().field("targets").index(k).key(&attribute.name)
                    })?;
                }
            }
        }
    }

    for i in 0..root.accessors.len() {
        let path = || Path::new().field("accessors").index(i);
        let accessor = &root.accessors[i];
        check(accessor.buffer_view, buffer_views, || {
            path().field("bufferView")
        })?;
        if let Some(sparse) = accessor.sparse.as_ref() {
            require(sparse.indices_buffer_view, buffer_views, || {
                path().field("sparse.indices.bufferView")
            })?;
            require(sparse.values_buffer_view, buffer_views, || {
                path().field("sparse.values.bufferView")
            })?;
        }

        // Stride propagation: a view-declared stride wins, the packed
        // element size is the fallback.
        let declared = root.accessors[i]
            .buffer_view
            .and_then(|view| root.buffer_views[view.value()].byte_stride);
        let accessor = &mut root.accessors[i];
        accessor.stride = match declared {
            Some(stride) if stride != 0 => stride,
            _ => accessor::element_size(accessor.type_, accessor.component_type),
        };
    }

    for (i, texture) in root.textures.iter().enumerate() {
        let path = || Path::new().field("textures").index(i);
        check(texture.image, images, || path().field("source"))?;
        check(texture.sampler, samplers, || path().field("sampler"))?;
    }

    for (i, image) in root.images.iter().enumerate() {
        check(image.buffer_view, buffer_views, || {
            Path::new().field("images").index(i).field("bufferView")
        })?;
    }

    for (i, material) in root.materials.iter().enumerate() {
        let path = || Path::new().field("materials").index(i);
        let views = [
            (&material.normal_texture, "normalTexture"),
            (&material.occlusion_texture, "occlusionTexture"),
            (&material.emissive_texture, "emissiveTexture"),
            (
                &material.pbr_metallic_roughness.base_color_texture,
                "pbrMetallicRoughness.baseColorTexture",
            ),
            (
                &material.pbr_metallic_roughness.metallic_roughness_texture,
                "pbrMetallicRoughness.metallicRoughnessTexture",
            ),
        ];
        for (view, field) in views {
            if let Some(view) = view {
                check(view.texture, textures, || path().field(field))?;
            }
        }
        if let Some(pbr) = material.pbr_specular_glossiness.as_ref() {
            for (view, field) in [
                (&pbr.diffuse_texture, "diffuseTexture"),
                (&pbr.specular_glossiness_texture, "specularGlossinessTexture"),
            ] {
                if let Some(view) = view {
                    check(view.texture, textures, || path().field(field))?;
                }
            }
        }
    }

    for (i, view) in root.buffer_views.iter().enumerate() {
        require(view.buffer, buffers, || {
            Path::new().field("bufferViews").index(i).field("buffer")
        })?;
    }

    for (i, skin) in root.skins.iter().enumerate() {
        let path = || Path::new().field("skins").index(i);
        for (j, joint) in skin.joints.iter().enumerate() {
            require(Some(*joint), nodes, || path().field("joints").index(j))?;
        }
        check(skin.skeleton, nodes, || path().field("skeleton"))?;
        check(skin.inverse_bind_matrices, accessors, || {
            path().field("inverseBindMatrices")
        })?;
    }

    for i in 0..root.nodes.len() {
        let path = || Path::new().field("nodes").index(i);
        for j in 0..root.nodes[i].children.len() {
            let child = root.nodes[i].children[j];
            require(Some(child), nodes, || path().field("children").index(j))?;
            if root.nodes[child.value()].parent.is_some() {
                return Err(reject(
                    path().field("children").index(j),
                    Reason::MultipleParents,
                ));
            }
            root.nodes[child.value()].parent = Some(Index::new(i as u32));
        }
        let node = &root.nodes[i];
        check(node.mesh, meshes, || path().field("mesh"))?;
        check(node.skin, skins, || path().field("skin"))?;
        check(node.camera, cameras, || path().field("camera"))?;
        check(node.light, lights, || path().field("light"))?;
    }

    // Scene roots must be free nodes, claimed by at most one scene.
    let mut claimed = vec![false; nodes];
    for (i, scene) in root.scenes.iter().enumerate() {
        let path = || Path::new().field("scenes").index(i);
        for (j, node) in scene.nodes.iter().enumerate() {
            require(Some(*node), nodes, || path().field("nodes").index(j))?;
            if root.nodes[node.value()].parent.is_some() || claimed[node.value()] {
                return Err(reject(
                    path().field("nodes").index(j),
                    Reason::MultipleParents,
                ));
            }
            claimed[node.value()] = true;
        }
    }

    check(root.scene, scenes, || Path::new().field("scene"))?;

    for (i, animation) in root.animations.iter().enumerate() {
        let path = || Path::new().field("animations").index(i);
        for (j, sampler) in animation.samplers.iter().enumerate() {
            let path = || path().field("samplers").index(j);
            require(sampler.input, accessors, || path().field("input"))?;
            require(sampler.output, accessors, || path().field("output"))?;
        }
        for (j, channel) in animation.channels.iter().enumerate() {
            let path = || path().field("channels").index(j);
            require(channel.sampler, animation.samplers.len(), || {
                path().field("sampler")
            })?;
            check(channel.target_node, nodes, || path().field("target.node"))?;
        }
    }

    Ok(())
}
