use gltf_lite::validation::Error as Reason;
use gltf_lite::Error;

fn reason_of(error: Error) -> (String, Reason) {
    match error {
        Error::Validation(mut report) => {
            let (path, reason) = report.remove(0);
            (path.to_string(), reason)
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn dangling_attribute_reference_fails_the_parse() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "meshes":[{"primitives":[{"attributes":{"POSITION":5}}]}],
        "accessors":[
            {"componentType":5126,"count":1,"type":"VEC3"},
            {"componentType":5126,"count":1,"type":"VEC3"},
            {"componentType":5126,"count":1,"type":"VEC3"}
        ]
    }"#;
    let (path, reason) = reason_of(gltf_lite::parse(source).unwrap_err());
    assert_eq!(reason, Reason::IndexOutOfBounds);
    assert!(path.contains("meshes[0]"), "unexpected path {}", path);
}

#[test]
fn doubly_parented_node_fails_the_parse() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "nodes":[{"children":[2]},{"children":[2]},{}]
    }"#;
    let (path, reason) = reason_of(gltf_lite::parse(source).unwrap_err());
    assert_eq!(reason, Reason::MultipleParents);
    assert!(path.starts_with("nodes[1]"), "unexpected path {}", path);
}

#[test]
fn scene_root_with_a_parent_fails_the_parse() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "nodes":[{"children":[1]},{}],
        "scenes":[{"nodes":[1]}]
    }"#;
    let (_, reason) = reason_of(gltf_lite::parse(source).unwrap_err());
    assert_eq!(reason, Reason::MultipleParents);
}

#[test]
fn node_claimed_by_two_scenes_fails_the_parse() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "nodes":[{}],
        "scenes":[{"nodes":[0]},{"nodes":[0]}]
    }"#;
    let (path, reason) = reason_of(gltf_lite::parse(source).unwrap_err());
    assert_eq!(reason, Reason::MultipleParents);
    assert!(path.starts_with("scenes[1]"), "unexpected path {}", path);
}

#[test]
fn parent_back_links_are_written() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "nodes":[{"children":[1,2]},{},{}],
        "scenes":[{"nodes":[0]}]
    }"#;
    let root = gltf_lite::parse(source).unwrap();
    assert!(root.nodes[0].parent.is_none());
    assert_eq!(root.nodes[1].parent.unwrap().value(), 0);
    assert_eq!(root.nodes[2].parent.unwrap().value(), 0);
}

#[test]
fn buffer_view_requires_a_buffer() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "bufferViews":[{"byteLength":4}]
    }"#;
    let (path, reason) = reason_of(gltf_lite::parse(source).unwrap_err());
    assert_eq!(reason, Reason::Missing);
    assert_eq!(path, "bufferViews[0].buffer");
}

#[test]
fn sparse_accessor_requires_both_views() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "buffers":[{"byteLength":16}],
        "bufferViews":[{"buffer":0,"byteLength":16}],
        "accessors":[{
            "componentType":5126,"count":4,"type":"SCALAR",
            "sparse":{"count":1,"indices":{"bufferView":0,"componentType":5121}}
        }]
    }"#;
    let (path, reason) = reason_of(gltf_lite::parse(source).unwrap_err());
    assert_eq!(reason, Reason::Missing);
    assert!(path.contains("sparse.values"), "unexpected path {}", path);
}

#[test]
fn animation_channel_sampler_is_scoped_to_its_animation() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "accessors":[
            {"componentType":5126,"count":2,"type":"SCALAR"},
            {"componentType":5126,"count":2,"type":"VEC3"}
        ],
        "animations":[{
            "samplers":[{"input":0,"output":1}],
            "channels":[{"sampler":1,"target":{"path":"translation"}}]
        }]
    }"#;
    let (path, reason) = reason_of(gltf_lite::parse(source).unwrap_err());
    assert_eq!(reason, Reason::IndexOutOfBounds);
    assert!(path.contains("channels[0].sampler"), "unexpected path {}", path);
}

#[test]
fn dangling_default_scene_fails_the_parse() {
    let source = br#"{"asset":{"version":"2.0"},"scene":1,"scenes":[{}]}"#;
    let (path, reason) = reason_of(gltf_lite::parse(source).unwrap_err());
    assert_eq!(reason, Reason::IndexOutOfBounds);
    assert_eq!(path, "scene");
}

#[test]
fn stride_comes_from_the_view_or_the_element() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "buffers":[{"byteLength":256}],
        "bufferViews":[
            {"buffer":0,"byteLength":128,"byteStride":32},
            {"buffer":0,"byteOffset":128,"byteLength":128}
        ],
        "accessors":[
            {"bufferView":0,"componentType":5126,"count":4,"type":"VEC3"},
            {"bufferView":1,"componentType":5126,"count":4,"type":"VEC3"},
            {"componentType":5123,"count":4,"type":"MAT3"}
        ]
    }"#;
    let root = gltf_lite::parse(source).unwrap();
    // Declared view stride wins.
    assert_eq!(root.accessors[0].stride, 32);
    // Otherwise the packed element size.
    assert_eq!(root.accessors[1].stride, 12);
    // Including the aligned matrix cases.
    assert_eq!(root.accessors[2].stride, 24);
}
