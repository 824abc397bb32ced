//! Hardware compatibility checking: can the user's PC run a given game,
//! and at what settings tier.

pub mod benchmarks;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use benchmarks::{cpu_score, gpu_score};

/// The user's hardware profile as entered on the Can It Run page.
/// `score` fields override the benchmark lookup when already known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareProfile {
    pub cpu_name: String,
    pub cpu_cores: Option<u32>,
    pub cpu_clock_ghz: Option<f32>,
    pub cpu_score: Option<u32>,
    pub gpu_name: String,
    pub gpu_vram_gb: Option<u32>,
    pub gpu_score: Option<u32>,
    pub ram_gb: u32,
}

/// Requirement scores for one tier (minimum or recommended).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequirementTier {
    pub cpu_score: u32,
    pub gpu_score: u32,
    pub ram_gb: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameRequirements {
    pub minimum: RequirementTier,
    pub recommended: RequirementTier,
}

/// Expected settings tier for the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsTier {
    CannotRun,
    Low,
    Medium,
    High,
}

/// Per-axis pass/fail detail plus the resolved user scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompatDetails {
    pub cpu_meets_min: bool,
    pub cpu_meets_rec: bool,
    pub gpu_meets_min: bool,
    pub gpu_meets_rec: bool,
    pub ram_meets_min: bool,
    pub ram_meets_rec: bool,
    pub user_cpu_score: u32,
    pub user_gpu_score: u32,
    pub user_ram_gb: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatReport {
    pub can_run: bool,
    pub settings: SettingsTier,
    pub notes: String,
    pub details: CompatDetails,
}

/// Position of `value` relative to the minimum..recommended band. Not capped
/// above 1.0: an axis far past recommended raises the average and can offset
/// a weaker axis. A degenerate band (recommended <= minimum) counts as met.
fn gap_fraction(value: u32, min: u32, max: u32) -> f32 {
    if max <= min {
        return 1.0;
    }
    (value as f32 - min as f32) / (max as f32 - min as f32)
}

/// Compare a hardware profile against game requirements and produce a verdict.
///
/// Tiering follows three bands: below minimum is `CannotRun` with the
/// bottleneck axes named in `notes`; meeting recommended on all axes is
/// `High`; in between, the average normalized gap across CPU/GPU/RAM picks
/// `Medium` (>= 0.5) or `Low`.
pub fn check_compatibility(
    hardware: &HardwareProfile,
    requirements: &GameRequirements,
) -> CompatReport {
    let user_cpu = hardware.cpu_score.unwrap_or_else(|| {
        cpu_score(&hardware.cpu_name, hardware.cpu_cores, hardware.cpu_clock_ghz)
    });
    let user_gpu = hardware
        .gpu_score
        .unwrap_or_else(|| gpu_score(&hardware.gpu_name, hardware.gpu_vram_gb));
    let user_ram = hardware.ram_gb;

    let min = &requirements.minimum;
    let rec = &requirements.recommended;

    let details = CompatDetails {
        cpu_meets_min: user_cpu >= min.cpu_score,
        cpu_meets_rec: user_cpu >= rec.cpu_score,
        gpu_meets_min: user_gpu >= min.gpu_score,
        gpu_meets_rec: user_gpu >= rec.gpu_score,
        ram_meets_min: user_ram >= min.ram_gb,
        ram_meets_rec: user_ram >= rec.ram_gb,
        user_cpu_score: user_cpu,
        user_gpu_score: user_gpu,
        user_ram_gb: user_ram,
    };

    let meets_minimum = details.cpu_meets_min && details.gpu_meets_min && details.ram_meets_min;
    let meets_recommended =
        details.cpu_meets_rec && details.gpu_meets_rec && details.ram_meets_rec;

    let report = if !meets_minimum {
        let mut bottlenecks = Vec::new();
        if !details.cpu_meets_min {
            bottlenecks.push(format!("CPU (yours: {}, need: {})", user_cpu, min.cpu_score));
        }
        if !details.gpu_meets_min {
            bottlenecks.push(format!("GPU (yours: {}, need: {})", user_gpu, min.gpu_score));
        }
        if !details.ram_meets_min {
            bottlenecks.push(format!("RAM (yours: {}GB, need: {}GB)", user_ram, min.ram_gb));
        }
        CompatReport {
            can_run: false,
            settings: SettingsTier::CannotRun,
            notes: format!(
                "Hardware below minimum requirements. Bottlenecks: {}",
                bottlenecks.join(", ")
            ),
            details,
        }
    } else if meets_recommended {
        CompatReport {
            can_run: true,
            settings: SettingsTier::High,
            notes: "Your hardware meets or exceeds recommended requirements. Enjoy high settings!"
                .to_string(),
            details,
        }
    } else {
        let cpu_gap = gap_fraction(user_cpu, min.cpu_score, rec.cpu_score);
        let gpu_gap = gap_fraction(user_gpu, min.gpu_score, rec.gpu_score);
        let ram_gap = gap_fraction(user_ram, min.ram_gb, rec.ram_gb);
        let avg_gap = (cpu_gap + gpu_gap + ram_gap) / 3.0;

        if avg_gap >= 0.5 {
            CompatReport {
                can_run: true,
                settings: SettingsTier::Medium,
                notes: "Your hardware is between minimum and recommended. Expect medium settings."
                    .to_string(),
                details,
            }
        } else {
            CompatReport {
                can_run: true,
                settings: SettingsTier::Low,
                notes: "Your hardware meets minimum requirements. Expect low settings for smooth gameplay."
                    .to_string(),
                details,
            }
        }
    };

    info!(
        "Compatibility check: cpu={} gpu={} ram={}GB -> {:?}",
        user_cpu, user_gpu, user_ram, report.settings
    );
    report
}
