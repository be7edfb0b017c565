//! Shared fixtures: build small trace archives on disk.

#![allow(dead_code)]

use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::{json, Value};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Encode a solid-color PNG
pub fn solid_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn ndjson(lines: &[Value]) -> String {
    lines
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the given members into a zip archive in a temp file
pub fn write_archive(members: &[(&str, Vec<u8>)]) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    let mut writer = ZipWriter::new(file.reopen().unwrap());

    for (name, data) in members {
        writer
            .start_file(name.to_string(), SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }

    writer.finish().unwrap();
    file
}

pub fn trace_events() -> Vec<Value> {
    vec![
        json!({
            "type": "context-options",
            "timestamp": 2000.0,
            "browser": { "name": "chromium", "channel": "chrome" },
            "platform": "linux",
            "version": "1.40.0",
            "sdkLanguage": "javascript",
            "title": "checkout flow",
            "wallTime": 1_700_000_000_000.0,
            "contextOptions": {
                "baseURL": "http://localhost:3000",
                "viewport": { "width": 1280, "height": 720 }
            }
        }),
        json!({
            "type": "screencast-frame", "timestamp": 2000.0, "pageId": "page@1",
            "sha1": "frame-a", "width": 8, "height": 8
        }),
        json!({
            "type": "before", "callId": "call-1", "pageId": "page@1",
            "timestamp": 2500.0, "startTime": 2500.0,
            "class": "Frame", "method": "click", "title": "Click submit",
            "params": { "selector": "#submit" }
        }),
        json!({
            "type": "log", "callId": "call-1", "timestamp": 2700.0,
            "time": 2700.0, "message": "waiting for selector #submit"
        }),
        json!({
            "type": "console", "timestamp": 3000.0, "pageId": "page@1",
            "messageType": "error", "text": "Failed to load resource",
            "location": { "url": "http://localhost:3000/app.js", "lineNumber": 12, "columnNumber": 4 }
        }),
        json!({
            "type": "console", "timestamp": 3100.0, "pageId": "page@1",
            "messageType": "log", "text": "hello"
        }),
        json!({ "type": "after", "callId": "call-1", "timestamp": 3500.0, "endTime": 3500.0 }),
        json!({
            "type": "page-error", "timestamp": 4000.0, "pageId": "page@1",
            "error": { "message": "Uncaught TypeError", "stack": "at app.js:12" }
        }),
        json!({
            "type": "screencast-frame", "timestamp": 4000.0, "pageId": "page@1",
            "sha1": "frame-b", "width": 8, "height": 8
        }),
        json!({
            "type": "before", "callId": "call-2", "pageId": "page@2",
            "timestamp": 4500.0, "startTime": 4500.0,
            "class": "Frame", "method": "fill",
            "params": { "selector": "#email", "value": "a@b.c" }
        }),
        json!({
            "type": "screencast-frame", "timestamp": 5000.0, "pageId": "page@1",
            "sha1": "frame-c", "width": 8, "height": 8
        }),
        json!({
            "type": "after", "callId": "call-2", "timestamp": 5500.0, "endTime": 5500.0,
            "error": { "message": "Element not found", "stack": "at fill" }
        }),
        json!({ "type": "input", "timestamp": 6000.0 }),
    ]
}

pub fn network_entries() -> Vec<Value> {
    vec![
        json!({
            "type": "resource-snapshot",
            "snapshot": {
                "request": { "method": "GET", "url": "http://localhost:3000/" },
                "response": {
                    "status": 200, "statusText": "OK",
                    "headers": [{ "name": "Content-Type", "value": "text/html" }],
                    "content": { "size": 512 }
                },
                "timings": { "dns": 1.0, "connect": 2.0, "ssl": -1.0, "send": 0.5, "wait": 10.0, "receive": 1.5 }
            }
        }),
        json!({
            "type": "resource-snapshot",
            "snapshot": {
                "request": { "method": "GET", "url": "http://localhost:3000/logo.png" },
                "response": { "status": 404, "statusText": "Not Found" }
            }
        }),
        json!({
            "type": "resource-snapshot",
            "snapshot": {
                "request": { "method": "POST", "url": "http://localhost:3000/api/order" },
                "response": { "status": 0 },
                "_failureText": "net::ERR_CONNECTION_REFUSED"
            }
        }),
        json!({ "type": "frame-snapshot", "snapshot": {} }),
    ]
}

/// Full fixture: events, network log and three frames (red, red, blue)
pub fn sample_trace() -> NamedTempFile {
    let red = solid_png(8, 8, [255, 0, 0, 255]);
    let blue = solid_png(8, 8, [0, 0, 255, 255]);

    write_archive(&[
        ("trace.trace", ndjson(&trace_events()).into_bytes()),
        ("trace.network", ndjson(&network_entries()).into_bytes()),
        ("resources/frame-a", red.clone()),
        ("resources/frame-b", red),
        ("resources/frame-c", blue),
    ])
}
