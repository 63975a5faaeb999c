//! Common test utilities for building pipelines.
use pipeforge::prelude::*;
use serde_json::json;

/// A csv reader feeding a parquet writer.
///
/// `1: csvFileInput "Sales" -> 2: parquetFileOutput`
#[allow(dead_code)]
pub fn create_csv_to_parquet() -> Pipeline {
    Pipeline::new()
        .with_node(
            PipelineNode::new(
                "1",
                "csvFileInput",
                json!({ "filePath": "data/sales.csv", "csvOptions": { "sep": ";" } }),
            )
            .with_label("Sales"),
        )
        .with_node(PipelineNode::new(
            "2",
            "parquetFileOutput",
            json!({ "filePath": "out/sales.parquet", "parquetOptions": { "compression": "snappy" } }),
        ))
        .with_edge("1", "2")
}

/// Two readers that share the label "Output", each printed to a console.
///
/// `a: csv "Output" -> c: console`, `b: csv "Output" -> d: console`
#[allow(dead_code)]
pub fn create_shared_label_pipeline() -> Pipeline {
    Pipeline::new()
        .with_node(csv_node("a", "first.csv").with_label("Output"))
        .with_node(csv_node("b", "second.csv").with_label("Output"))
        .with_node(PipelineNode::new("c", "console", json!({})))
        .with_node(PipelineNode::new("d", "console", json!({ "limit": "3" })))
        .with_edge("a", "c")
        .with_edge("b", "d")
}

/// One reader fanning out to two parquet writers.
#[allow(dead_code)]
pub fn create_fan_out_pipeline() -> Pipeline {
    Pipeline::new()
        .with_node(csv_node("src", "in.csv").with_label("Input"))
        .with_node(parquet_node("p1", "one.parquet"))
        .with_node(parquet_node("p2", "two.parquet"))
        .with_edge("src", "p1")
        .with_edge("src", "p2")
}

/// Three nodes whose upstream lists form a loop. The components are
/// transforms registered by [`registry_with_transform`].
#[allow(dead_code)]
pub fn create_cycle_pipeline() -> Pipeline {
    let mut pipeline = Pipeline::new()
        .with_node(PipelineNode::new("x", "passThrough", json!({})))
        .with_node(PipelineNode::new("y", "passThrough", json!({})))
        .with_node(PipelineNode::new("z", "passThrough", json!({})));
    pipeline.connect("x", "y");
    pipeline.connect("y", "z");
    pipeline.connect("z", "x");
    pipeline
}

#[allow(dead_code)]
pub fn csv_node(id: &str, path: &str) -> PipelineNode {
    PipelineNode::new(
        id,
        "csvFileInput",
        json!({ "filePath": path, "csvOptions": { "sep": "," } }),
    )
}

#[allow(dead_code)]
pub fn parquet_node(id: &str, path: &str) -> PipelineNode {
    PipelineNode::new(id, "parquetFileOutput", json!({ "filePath": path }))
}

/// The persisted form of [`create_csv_to_parquet`], as the canvas saves it.
#[allow(dead_code)]
pub fn pipeline_json() -> &'static str {
    r#"{
        "nodes": [
            {
                "id": "1",
                "type": "csvFileInput",
                "position": { "x": 10, "y": 20 },
                "data": {
                    "label": "Sales",
                    "config": { "filePath": "data/sales.csv", "csvOptions": { "sep": ";" } }
                }
            },
            {
                "id": "2",
                "type": "parquetFileOutput",
                "data": {
                    "config": {
                        "filePath": "out/sales.parquet",
                        "parquetOptions": { "compression": "snappy" }
                    }
                }
            }
        ],
        "edges": [
            { "id": "e1-2", "source": "1", "target": "2", "sourceHandle": "output", "targetHandle": "input-0" }
        ]
    }"#
}

/// A registry with the built-ins plus a `passThrough` transform that copies
/// its input.
#[allow(dead_code)]
pub fn registry_with_transform() -> ComponentRegistry {
    let mut registry = ComponentRegistry::with_defaults().unwrap();
    let descriptor = ComponentDescriptor::new(
        "passThrough",
        "Pass Through",
        Category::Transform,
        ConfigSchema::new(Vec::new(), json!({})),
        |_| Ok(ComponentConfig::Console(Default::default())),
    );
    registry
        .register(descriptor)
        .expect("passThrough registers once");
    registry
}
