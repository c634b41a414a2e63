// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tensor-cli inspect` command: display a model's signature and layers.

use std::path::PathBuf;

use predictor::{ModelManifest, Predictor, MANIFEST_FILE};

pub fn execute(model: PathBuf) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             tensor-cli · Model Inspector             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let predictor = Predictor::<f32>::load(&model).map_err(|e| {
        anyhow::anyhow!("failed to load model from '{}': {e}", model.display())
    })?;
    let manifest: &ModelManifest = predictor.manifest();

    // ── Signature ──────────────────────────────────────────────
    println!("  Model: {}", manifest.name);
    println!("  Manifest: {}", model.join(MANIFEST_FILE).display());
    println!();
    println!("  {:<8} {:<30} {:<20}", "Kind", "Name", "Shape");
    println!("  {}", "-".repeat(58));
    for input in predictor.input_metadata() {
        println!("  {:<8} {:<30} {:<20}", "input", input.name, input.shape.to_string());
    }
    for output in predictor.output_metadata() {
        println!("  {:<8} {:<30} {:<20}", "output", output.name, output.shape.to_string());
    }
    println!();

    // ── Layers ─────────────────────────────────────────────────
    println!("  {:<4} {:<24} {:<24} {:<10}", "Idx", "Name", "Weight", "Activ.");
    println!("  {}", "-".repeat(64));
    for (idx, layer) in manifest.layers.iter().enumerate() {
        println!(
            "  {:<4} {:<24} {:<24} {:<10}",
            idx,
            layer.name,
            layer.weight,
            format!("{:?}", layer.activation).to_lowercase(),
        );
    }
    println!();

    // ── Devices ────────────────────────────────────────────────
    for device in predictor.devices() {
        println!("  Device: {} ({})", device.name, device.device_type);
    }
    println!();
    Ok(())
}
