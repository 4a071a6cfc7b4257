use approx::assert_relative_eq;
use gltf_lite::buffer::Payload;

fn float_buffer(values: &[f32]) -> Vec<u8> {
    bytemuck::cast_slice(values).to_vec()
}

#[test]
fn normalized_u16_reads_as_one() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "buffers":[{"byteLength":2}],
        "bufferViews":[{"buffer":0,"byteLength":2}],
        "accessors":[{
            "bufferView":0,"componentType":5123,"count":1,
            "type":"SCALAR","normalized":true
        }]
    }"#;
    let mut root = gltf_lite::parse(source).unwrap();
    root.buffers[0].payload = Payload::Owned(vec![0xFF, 0xFF]);

    let mut out = [0.0f32; 1];
    assert!(root.accessors[0].read_float(&root, 0, &mut out));
    assert_relative_eq!(out[0], 1.0);
}

#[test]
fn reads_strided_vec3_floats() {
    // Two vec3 elements interleaved in a 16-byte stride.
    let source = br#"{
        "asset":{"version":"2.0"},
        "buffers":[{"byteLength":32}],
        "bufferViews":[{"buffer":0,"byteLength":32,"byteStride":16}],
        "accessors":[{"bufferView":0,"componentType":5126,"count":2,"type":"VEC3"}]
    }"#;
    let mut root = gltf_lite::parse(source).unwrap();
    let mut payload = float_buffer(&[1.0, 2.0, 3.0, -1.0]);
    payload.extend(float_buffer(&[4.0, 5.0, 6.0, -1.0]));
    root.buffers[0].payload = Payload::Owned(payload);

    let accessor = &root.accessors[0];
    assert_eq!(accessor.stride, 16);

    let mut out = [0.0f32; 3];
    assert!(accessor.read_float(&root, 0, &mut out));
    assert_eq!(out, [1.0, 2.0, 3.0]);
    assert!(accessor.read_float(&root, 1, &mut out));
    assert_eq!(out, [4.0, 5.0, 6.0]);

    // Element 2 lies outside the loaded payload.
    assert!(!accessor.read_float(&root, 2, &mut out));
}

#[test]
fn read_float_refuses_small_out_buffers() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "buffers":[{"byteLength":12}],
        "bufferViews":[{"buffer":0,"byteLength":12}],
        "accessors":[{"bufferView":0,"componentType":5126,"count":1,"type":"VEC3"}]
    }"#;
    let mut root = gltf_lite::parse(source).unwrap();
    root.buffers[0].payload = Payload::Owned(float_buffer(&[1.0, 2.0, 3.0]));

    let mut out = [0.0f32; 2];
    assert!(!root.accessors[0].read_float(&root, 0, &mut out));
}

#[test]
fn read_float_refuses_sparse_and_viewless_accessors() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "buffers":[{"byteLength":8}],
        "bufferViews":[
            {"buffer":0,"byteLength":1},
            {"buffer":0,"byteOffset":4,"byteLength":4}
        ],
        "accessors":[
            {
                "componentType":5126,"count":4,"type":"SCALAR",
                "sparse":{
                    "count":1,
                    "indices":{"bufferView":0,"componentType":5121},
                    "values":{"bufferView":1}
                }
            },
            {"componentType":5126,"count":4,"type":"SCALAR"}
        ]
    }"#;
    let mut root = gltf_lite::parse(source).unwrap();
    root.buffers[0].payload = Payload::Owned(vec![0u8; 8]);

    let mut out = [0.0f32; 1];
    // Sparse accessors are not supported by the flat reader.
    assert!(!root.accessors[0].read_float(&root, 0, &mut out));
    // Nor are accessors with no buffer view at all.
    assert!(!root.accessors[1].read_float(&root, 0, &mut out));
    assert_eq!(root.accessors[1].read_index(&root, 0), 0);
}

#[test]
fn read_index_across_component_widths() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "buffers":[{"byteLength":12}],
        "bufferViews":[
            {"buffer":0,"byteLength":2},
            {"buffer":0,"byteOffset":2,"byteLength":4},
            {"buffer":0,"byteOffset":8,"byteLength":4}
        ],
        "accessors":[
            {"bufferView":0,"componentType":5121,"count":2,"type":"SCALAR"},
            {"bufferView":1,"componentType":5123,"count":2,"type":"SCALAR"},
            {"bufferView":2,"componentType":5125,"count":1,"type":"SCALAR"}
        ]
    }"#;
    let mut root = gltf_lite::parse(source).unwrap();
    let mut payload = vec![7u8, 8];
    payload.extend_from_slice(&300u16.to_le_bytes());
    payload.extend_from_slice(&400u16.to_le_bytes());
    payload.extend_from_slice(&[0, 0]);
    payload.extend_from_slice(&(1u32 << 20).to_le_bytes());
    root.buffers[0].payload = Payload::Owned(payload);

    assert_eq!(root.accessors[0].read_index(&root, 0), 7);
    assert_eq!(root.accessors[0].read_index(&root, 1), 8);
    assert_eq!(root.accessors[1].read_index(&root, 0), 300);
    assert_eq!(root.accessors[1].read_index(&root, 1), 400);
    assert_eq!(root.accessors[2].read_index(&root, 0), 1 << 20);
}

#[test]
fn read_index_truncates_floats() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "buffers":[{"byteLength":4}],
        "bufferViews":[{"buffer":0,"byteLength":4}],
        "accessors":[{"bufferView":0,"componentType":5126,"count":1,"type":"SCALAR"}]
    }"#;
    let mut root = gltf_lite::parse(source).unwrap();
    root.buffers[0].payload = Payload::Owned(float_buffer(&[41.75]));
    assert_eq!(root.accessors[0].read_index(&root, 0), 41);
}

#[test]
fn world_transform_after_parse() {
    let source = br#"{
        "asset":{"version":"2.0"},
        "nodes":[
            {"children":[1],"translation":[10.0,0.0,0.0]},
            {"scale":[2.0,2.0,2.0],"translation":[1.0,0.0,0.0]}
        ],
        "scenes":[{"nodes":[0]}],
        "scene":0
    }"#;
    let root = gltf_lite::parse(source).unwrap();
    let world = root.nodes[1].transform_world(&root);
    assert_relative_eq!(world[12], 11.0);
    assert_relative_eq!(world[0], 2.0);
}
