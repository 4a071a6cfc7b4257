use gltf_lite::{material, mesh, texture, Error, FileType, Options};

#[test]
fn minimal_document() {
    let source = br#"{"asset":{"version":"2.0"}}"#;
    let root = gltf_lite::parse(source).unwrap();

    assert_eq!(root.asset.version.as_deref(), Some("2.0"));
    assert_eq!(root.file_type, FileType::Standard);
    assert!(root.meshes.is_empty());
    assert!(root.nodes.is_empty());
    assert!(root.scenes.is_empty());
    assert!(root.scene.is_none());
    assert!(root.bin().is_none());
    // The whole input is preserved for extras retrieval.
    assert_eq!(root.json(), source);
}

#[test]
fn identical_inputs_decode_identically() {
    let source = br#"{
        "asset":{"version":"2.0","generator":"test"},
        "nodes":[{"translation":[1,2,3]},{"children":[0]}],
        "scenes":[{"nodes":[1]}],
        "scene":0
    }"#;
    let first = gltf_lite::parse(source).unwrap();
    let second = gltf_lite::parse(source).unwrap();
    assert_eq!(format!("{:?}", first), format!("{:?}", second));
}

#[test]
fn unknown_extensions_and_members_are_skipped() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "extensions":{"FOO_bar":{"deep":{"list":[1,2,{"three":3}]}}},
        "nodes":[{"extensions":{"FOO_baz":[true,null]},"mystery":42}],
        "wat":"ignored"
    }"#;
    let root = gltf_lite::parse(source).unwrap();
    assert_eq!(root.nodes.len(), 1);
    assert!(root.nodes[0].light.is_none());
}

#[test]
fn pinned_file_type_must_match() {
    let json = br#"{"asset":{"version":"2.0"}}"#;
    let pinned_binary = Options {
        file_type: Some(FileType::Binary),
        ..Default::default()
    };
    assert!(matches!(pinned_binary.parse(json), Err(Error::UnknownFormat)));

    let pinned_standard = Options {
        file_type: Some(FileType::Standard),
        ..Default::default()
    };
    assert!(pinned_standard.parse(json).is_ok());
}

#[test]
fn pinned_token_capacity() {
    let json = br#"{"asset":{"version":"2.0"}}"#;
    // {}, "asset", {}, "version", "2.0" -> five tokens.
    let exact = Options {
        token_capacity: Some(5),
        ..Default::default()
    };
    assert!(exact.parse(json).is_ok());

    let starved = Options {
        token_capacity: Some(4),
        ..Default::default()
    };
    assert!(matches!(
        starved.parse(json),
        Err(Error::Json(gltf_lite::token::Error::TooManyTokens))
    ));
}

#[test]
fn inputs_shorter_than_a_glb_header_are_rejected() {
    assert!(matches!(gltf_lite::parse(b"{}"), Err(Error::TooShort)));
}

#[test]
fn mismatched_brackets_are_invalid_json() {
    assert!(matches!(
        gltf_lite::parse(br#"{"a":[1,2,3}"#),
        Err(Error::Json(_))
    ));
}

#[test]
fn a_non_object_document_is_not_gltf() {
    // Bare words tokenise as primitives; the schema decoder rejects them.
    assert!(matches!(
        gltf_lite::parse(b"this is not a document"),
        Err(Error::Deserialize(_))
    ));
}

#[test]
fn extras_spans_slice_the_source() {
    let source = br#"{
        "asset":{"version":"2.0","extras":{"made_with":"care"}},
        "nodes":[{"extras":[1,2,3]}]
    }"#;
    let root = gltf_lite::parse(source).unwrap();
    assert_eq!(
        root.extras_json(&root.asset.extras),
        Some(r#"{"made_with":"care"}"#)
    );
    assert_eq!(root.extras_json(&root.nodes[0].extras), Some("[1,2,3]"));
    // The root object itself carried no extras.
    assert!(!root.extras.is_present());
    assert_eq!(root.extras_json(&root.extras), None);
}

#[test]
fn sampler_defaults_to_repeat_wrapping() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "samplers":[{},{"wrapS":33071,"magFilter":9728}]
    }"#;
    let root = gltf_lite::parse(source).unwrap();
    assert_eq!(root.samplers[0].wrap_s, texture::REPEAT);
    assert_eq!(root.samplers[0].wrap_t, texture::REPEAT);
    assert_eq!(root.samplers[0].mag_filter, None);
    assert_eq!(root.samplers[1].wrap_s, texture::CLAMP_TO_EDGE);
    assert_eq!(root.samplers[1].wrap_t, texture::REPEAT);
    assert_eq!(root.samplers[1].mag_filter, Some(texture::NEAREST));
}

#[test]
fn material_defaults_and_extensions() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "materials":[
            {},
            {
                "pbrMetallicRoughness":{
                    "baseColorFactor":[0.5,0.5,0.5,1.0],
                    "metallicFactor":0.25,
                    "baseColorTexture":{"index":0,"texCoord":1,
                        "extensions":{"KHR_texture_transform":{"offset":[0.25,0.5],"scale":[2.0,2.0]}}}
                },
                "normalTexture":{"index":0,"scale":0.8},
                "occlusionTexture":{"index":0,"strength":0.5},
                "alphaMode":"MASK",
                "alphaCutoff":0.75,
                "doubleSided":true,
                "extensions":{
                    "KHR_materials_pbrSpecularGlossiness":{"glossinessFactor":0.125},
                    "KHR_materials_unlit":{}
                }
            }
        ],
        "textures":[{}]
    }"#;
    let root = gltf_lite::parse(source).unwrap();

    let plain = &root.materials[0];
    assert_eq!(plain.pbr_metallic_roughness.base_color_factor, [1.0; 4]);
    assert_eq!(plain.pbr_metallic_roughness.metallic_factor, 1.0);
    assert_eq!(plain.pbr_metallic_roughness.roughness_factor, 1.0);
    assert_eq!(plain.alpha_mode, material::AlphaMode::Opaque);
    assert_eq!(plain.alpha_cutoff, 0.5);
    assert!(!plain.double_sided);
    assert!(!plain.unlit);
    assert!(plain.pbr_specular_glossiness.is_none());

    let fancy = &root.materials[1];
    assert_eq!(
        fancy.pbr_metallic_roughness.base_color_factor,
        [0.5, 0.5, 0.5, 1.0]
    );
    assert_eq!(fancy.pbr_metallic_roughness.metallic_factor, 0.25);
    let base_color = fancy.pbr_metallic_roughness.base_color_texture.as_ref().unwrap();
    assert_eq!(base_color.texcoord, 1);
    let transform = base_color.transform.unwrap();
    assert_eq!(transform.offset, [0.25, 0.5]);
    assert_eq!(transform.scale, [2.0, 2.0]);
    assert_eq!(transform.rotation, 0.0);
    assert_eq!(fancy.normal_texture.as_ref().unwrap().scale, 0.8);
    assert_eq!(fancy.occlusion_texture.as_ref().unwrap().scale, 0.5);
    assert_eq!(fancy.alpha_mode, material::AlphaMode::Mask);
    assert_eq!(fancy.alpha_cutoff, 0.75);
    assert!(fancy.double_sided);
    assert!(fancy.unlit);
    let glossy = fancy.pbr_specular_glossiness.as_ref().unwrap();
    assert_eq!(glossy.glossiness_factor, 0.125);
    assert_eq!(glossy.diffuse_factor, [1.0; 4]);
    assert_eq!(glossy.specular_factor, [1.0; 3]);
}

#[test]
fn attributes_classify_and_keep_names() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "meshes":[{"primitives":[{
            "attributes":{"POSITION":0,"TEXCOORD_1":1,"_GHOST":2},
            "mode":1
        }]}],
        "accessors":[
            {"componentType":5126,"count":3,"type":"VEC3"},
            {"componentType":5126,"count":3,"type":"VEC2"},
            {"componentType":5126,"count":3,"type":"SCALAR"}
        ]
    }"#;
    let root = gltf_lite::parse(source).unwrap();
    let primitive = &root.meshes[0].primitives[0];
    assert_eq!(primitive.mode, mesh::Mode::Lines);

    let attributes = &primitive.attributes;
    assert_eq!(attributes.len(), 3);
    assert_eq!(attributes[0].name, "POSITION");
    assert_eq!(attributes[0].semantic, mesh::Semantic::Position);
    assert_eq!(attributes[1].semantic, mesh::Semantic::TexCoord);
    assert_eq!(attributes[1].set, 1);
    assert_eq!(attributes[2].name, "_GHOST");
    assert_eq!(attributes[2].semantic, mesh::Semantic::Invalid);
    assert_eq!(attributes[2].accessor.value(), 2);
}

#[test]
fn min_max_may_precede_type() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "accessors":[{
            "min":[-1.0,-2.0,-3.0],
            "max":[1.0,2.0,3.0],
            "componentType":5126,
            "count":1,
            "type":"VEC3"
        }]
    }"#;
    let root = gltf_lite::parse(source).unwrap();
    let accessor = &root.accessors[0];
    let min = accessor.min.unwrap();
    let max = accessor.max.unwrap();
    assert_eq!(&min[..3], &[-1.0, -2.0, -3.0]);
    assert_eq!(&max[..3], &[1.0, 2.0, 3.0]);
}

#[test]
fn lights_cameras_and_animations_link_up() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "extensions":{"KHR_lights_punctual":{"lights":[
            {"type":"spot","color":[1.0,0.5,0.25],"intensity":40.0,
             "spot":{"innerConeAngle":0.2,"outerConeAngle":0.4}}
        ]}},
        "extensionsUsed":["KHR_lights_punctual"],
        "cameras":[{"type":"perspective","perspective":{"yfov":0.7,"znear":0.01}}],
        "nodes":[
            {"extensions":{"KHR_lights_punctual":{"light":0}},"camera":0},
            {"translation":[0.0,1.0,0.0]}
        ],
        "animations":[{
            "samplers":[{"input":0,"output":1,"interpolation":"STEP"}],
            "channels":[{"sampler":0,"target":{"node":1,"path":"translation"}}]
        }],
        "accessors":[
            {"componentType":5126,"count":2,"type":"SCALAR"},
            {"componentType":5126,"count":2,"type":"VEC3"}
        ]
    }"#;
    let root = gltf_lite::parse(source).unwrap();

    assert_eq!(root.extensions_used, vec!["KHR_lights_punctual".to_string()]);
    let light = &root.lights[0];
    assert_eq!(light.color, [1.0, 0.5, 0.25]);
    assert_eq!(light.intensity, 40.0);
    match light.kind {
        gltf_lite::khr_lights_punctual::Kind::Spot {
            inner_cone_angle,
            outer_cone_angle,
        } => {
            assert_eq!(inner_cone_angle, 0.2);
            assert_eq!(outer_cone_angle, 0.4);
        }
        ref kind => panic!("expected a spot light, got {:?}", kind),
    }
    assert_eq!(root.nodes[0].light.unwrap().value(), 0);

    match root.cameras[0].projection {
        gltf_lite::camera::Projection::Perspective(perspective) => {
            assert_eq!(perspective.yfov, 0.7);
            assert_eq!(perspective.znear, 0.01);
            assert_eq!(perspective.zfar, None);
            assert_eq!(perspective.aspect_ratio, None);
        }
        ref projection => panic!("expected a perspective camera, got {:?}", projection),
    }

    let animation = &root.animations[0];
    assert_eq!(
        animation.samplers[0].interpolation,
        gltf_lite::animation::Interpolation::Step
    );
    assert_eq!(animation.samplers[0].input.unwrap().value(), 0);
    assert_eq!(animation.channels[0].sampler.unwrap().value(), 0);
    assert_eq!(animation.channels[0].target_node.unwrap().value(), 1);
    assert_eq!(
        animation.channels[0].target_path,
        gltf_lite::animation::Property::Translation
    );
}

#[test]
fn camera_without_projection_is_rejected() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "cameras":[{"type":"perspective"}]
    }"#;
    assert!(matches!(
        gltf_lite::parse(source),
        Err(Error::Deserialize(_))
    ));
}
