//! The hard-coded label batch and its runner.

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use labelforge_render::{RenderError, RenderOptions, image_dimensions, render_to_png_file};
use labelforge_symbology::Symbology;

/// Manifest file written next to the generated labels.
pub const MANIFEST_FILE: &str = "manifest.json";

/// One barcode label to generate.
#[derive(Debug, Clone)]
pub struct LabelJob {
    pub symbology: Symbology,
    pub payload: String,
    pub file_stem: String,
    pub options: RenderOptions,
}

/// Render defaults shared by the batch jobs. The house label geometry uses
/// a slightly narrower quiet zone than the renderer default.
pub fn batch_defaults() -> RenderOptions {
    RenderOptions {
        quiet_zone_mm: 5.0,
        ..RenderOptions::default()
    }
}

/// The standard pharmaceutical batch: five products across the four
/// supported symbologies, two of them with per-job geometry overrides.
pub fn standard_batch() -> Vec<LabelJob> {
    let defaults = batch_defaults();
    vec![
        LabelJob {
            symbology: Symbology::UpcA,
            payload: "036000291452".to_owned(),
            file_stem: "paracetamol_upc".to_owned(),
            options: defaults.clone(),
        },
        LabelJob {
            symbology: Symbology::Ean13,
            payload: "5901234123457".to_owned(),
            file_stem: "ibuprofen_ean".to_owned(),
            options: defaults.clone(),
        },
        LabelJob {
            symbology: Symbology::Code128,
            payload: "DRUG-1A2B-3C4D".to_owned(),
            file_stem: "amoxicillin_code128".to_owned(),
            options: RenderOptions {
                module_width_mm: 0.3,
                ..defaults.clone()
            },
        },
        LabelJob {
            symbology: Symbology::Code39 {
                add_checksum: false,
            },
            payload: "MED-2023-001".to_owned(),
            file_stem: "loratadine_code39".to_owned(),
            options: defaults.clone(),
        },
        LabelJob {
            symbology: Symbology::Code128,
            payload: "PCT500-2023001".to_owned(),
            file_stem: "paracetamol_custom".to_owned(),
            options: RenderOptions {
                module_height_mm: 20.0,
                font_size_pt: 12.0,
                ..defaults
            },
        },
    ]
}

/// Manifest entry for one generated label file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRecord {
    pub file: String,
    #[serde(flatten)]
    pub symbology: Symbology,
    pub payload: String,
    pub text: String,
    pub width_px: u32,
    pub height_px: u32,
}

/// A job the batch could not complete. Recorded and skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFailure {
    pub file_stem: String,
    pub error: String,
}

/// Written to [`MANIFEST_FILE`] after every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub files: Vec<LabelRecord>,
    pub failures: Vec<JobFailure>,
}

/// Run a label batch into `output_dir`, creating it if needed.
///
/// Jobs are attempted independently: a failure is logged, recorded in the
/// manifest and skipped. Only problems that sink the whole run (an
/// unwritable output directory, a manifest that cannot be written) are
/// returned as errors.
pub fn run_batch(jobs: &[LabelJob], output_dir: &Path) -> anyhow::Result<RunManifest> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("could not create output directory {}", output_dir.display()))?;

    let mut files = Vec::new();
    let mut failures = Vec::new();
    for job in jobs {
        match generate_label(job, output_dir) {
            Ok(record) => {
                tracing::info!(
                    "generated {} barcode: {}",
                    job.symbology,
                    output_dir.join(&record.file).display()
                );
                files.push(record);
            }
            Err(err) => {
                tracing::error!(
                    "failed to generate {} barcode for {:?}: {}",
                    job.symbology,
                    job.payload,
                    err
                );
                failures.push(JobFailure {
                    file_stem: job.file_stem.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    let manifest = RunManifest {
        run_id: Uuid::now_v7(),
        generated_at: Utc::now(),
        files,
        failures,
    };
    let manifest_path = output_dir.join(MANIFEST_FILE);
    let json =
        serde_json::to_string_pretty(&manifest).context("could not serialize the run manifest")?;
    fs::write(&manifest_path, json)
        .with_context(|| format!("could not write {}", manifest_path.display()))?;

    tracing::info!(
        "label batch complete: {} generated, {} failed, manifest at {}",
        manifest.files.len(),
        manifest.failures.len(),
        manifest_path.display()
    );
    Ok(manifest)
}

fn generate_label(job: &LabelJob, output_dir: &Path) -> Result<LabelRecord, RenderError> {
    let barcode = job.symbology.encode(&job.payload)?;
    let (width_px, height_px) = image_dimensions(&barcode, &job.options)?;
    let file = format!("{}.png", job.file_stem);
    render_to_png_file(&barcode, &job.options, &output_dir.join(&file))?;
    Ok(LabelRecord {
        file,
        symbology: job.symbology,
        payload: job.payload.clone(),
        text: barcode.text().to_owned(),
        width_px,
        height_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_batch_matches_the_product_table() {
        let jobs = standard_batch();
        assert_eq!(jobs.len(), 5);

        let stems: Vec<&str> = jobs.iter().map(|j| j.file_stem.as_str()).collect();
        assert_eq!(
            stems,
            [
                "paracetamol_upc",
                "ibuprofen_ean",
                "amoxicillin_code128",
                "loratadine_code39",
                "paracetamol_custom",
            ]
        );

        assert_eq!(jobs[0].symbology, Symbology::UpcA);
        assert_eq!(jobs[1].symbology, Symbology::Ean13);
        assert_eq!(jobs[2].symbology, Symbology::Code128);
        assert_eq!(
            jobs[3].symbology,
            Symbology::Code39 {
                add_checksum: false
            }
        );
        assert_eq!(jobs[4].symbology, Symbology::Code128);

        // Per-job overrides on top of the shared defaults.
        assert_eq!(jobs[2].options.module_width_mm, 0.3);
        assert_eq!(jobs[4].options.module_height_mm, 20.0);
        assert_eq!(jobs[4].options.font_size_pt, 12.0);
        for job in &jobs {
            assert_eq!(job.options.quiet_zone_mm, 5.0);
        }
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = vec![
            LabelJob {
                symbology: Symbology::Ean13,
                payload: "not-a-number".to_owned(),
                file_stem: "broken".to_owned(),
                options: batch_defaults(),
            },
            LabelJob {
                symbology: Symbology::UpcA,
                payload: "036000291452".to_owned(),
                file_stem: "fine".to_owned(),
                options: batch_defaults(),
            },
        ];

        let manifest = run_batch(&jobs, dir.path()).unwrap();
        assert_eq!(manifest.files.len(), 1);
        assert_eq!(manifest.failures.len(), 1);
        assert_eq!(manifest.failures[0].file_stem, "broken");
        assert!(manifest.failures[0].error.contains("invalid payload"));
        assert!(dir.path().join("fine.png").exists());
        assert!(!dir.path().join("broken.png").exists());
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let written = run_batch(&standard_batch(), dir.path()).unwrap();

        let raw = fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        let read: RunManifest = serde_json::from_str(&raw).unwrap();
        assert_eq!(read.run_id, written.run_id);
        assert_eq!(read.files.len(), written.files.len());
        assert!(read.failures.is_empty());

        // The flattened symbology tag round-trips too.
        assert_eq!(
            read.files[3].symbology,
            Symbology::Code39 {
                add_checksum: false
            }
        );
        assert!(raw.contains(r#""symbology": "code39""#));
    }

    #[test]
    fn checksummed_code39_text_lands_in_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = vec![LabelJob {
            symbology: Symbology::Code39 { add_checksum: true },
            payload: "MED-2023-001".to_owned(),
            file_stem: "checked".to_owned(),
            options: batch_defaults(),
        }];
        let manifest = run_batch(&jobs, dir.path()).unwrap();
        assert_eq!(manifest.files[0].text, "MED-2023-0010");
        assert_eq!(manifest.files[0].payload, "MED-2023-001");
    }
}
